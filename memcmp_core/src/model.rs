use serde::Serialize;

/// One line of `size` output for a compiled unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeSummary {
    pub text: u64,
    pub data: u64,
    pub bss: u64,
    /// Used only as a sort key; never checked against `text + data + bss`.
    pub total_decimal: u64,
    pub total_hex: String,
    pub filename: String,
    pub library_path: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    GlobalCode,
    LocalCode,
    GlobalBss,
    LocalBss,
    GlobalRodata,
    LocalRodata,
    GlobalData,
    LocalData,
}

impl SymbolKind {
    #[cfg(test)]
    pub const ALL: [SymbolKind; 8] = [
        SymbolKind::GlobalCode,
        SymbolKind::LocalCode,
        SymbolKind::GlobalBss,
        SymbolKind::LocalBss,
        SymbolKind::GlobalRodata,
        SymbolKind::LocalRodata,
        SymbolKind::GlobalData,
        SymbolKind::LocalData,
    ];

    pub fn from_tag(tag: char) -> Option<Self> {
        Some(match tag {
            'T' => SymbolKind::GlobalCode,
            't' => SymbolKind::LocalCode,
            'B' => SymbolKind::GlobalBss,
            'b' => SymbolKind::LocalBss,
            'R' => SymbolKind::GlobalRodata,
            'r' => SymbolKind::LocalRodata,
            'D' => SymbolKind::GlobalData,
            'd' => SymbolKind::LocalData,
            _ => return None,
        })
    }

    /// Accepts a whole nm field; anything but a single known tag is rejected.
    pub fn from_field(field: &str) -> Option<Self> {
        let mut chars = field.chars();
        let tag = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::from_tag(tag)
    }

    pub fn tag(self) -> char {
        match self {
            SymbolKind::GlobalCode => 'T',
            SymbolKind::LocalCode => 't',
            SymbolKind::GlobalBss => 'B',
            SymbolKind::LocalBss => 'b',
            SymbolKind::GlobalRodata => 'R',
            SymbolKind::LocalRodata => 'r',
            SymbolKind::GlobalData => 'D',
            SymbolKind::LocalData => 'd',
        }
    }

    pub fn is_code(self) -> bool {
        self.tag().eq_ignore_ascii_case(&'T')
    }

    pub fn is_data(self) -> bool {
        matches!(self.tag().to_ascii_uppercase(), 'B' | 'R' | 'D')
    }

    pub fn is_global(self) -> bool {
        self.tag().is_ascii_uppercase()
    }

    pub fn description(self) -> &'static str {
        match self {
            SymbolKind::GlobalCode => "Global code (text)",
            SymbolKind::LocalCode => "Local code (text)",
            SymbolKind::GlobalBss => "Global uninitialized data (BSS)",
            SymbolKind::LocalBss => "Local uninitialized data (BSS)",
            SymbolKind::GlobalRodata => "Global read-only data",
            SymbolKind::LocalRodata => "Local read-only data",
            SymbolKind::GlobalData => "Global initialized data",
            SymbolKind::LocalData => "Local initialized data",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub size: u64,
    pub kind: SymbolKind,
    pub name: String,
}

impl Symbol {
    pub fn is_code(&self) -> bool {
        self.kind.is_code()
    }

    pub fn is_data(&self) -> bool {
        self.kind.is_data()
    }

    pub fn is_global(&self) -> bool {
        self.kind.is_global()
    }
}

/// Parsed contents of one memstats log: the `size` line plus the nm symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemStats {
    pub size: SizeSummary,
    pub symbols: Vec<Symbol>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemStatsSummary {
    pub filename: String,
    pub text_size: u64,
    pub data_size: u64,
    pub bss_size: u64,
    pub total_size: u64,
    pub symbol_count: usize,
    pub code_symbols: usize,
    pub data_symbols: usize,
}

impl MemStats {
    /// Saturates at `u64::MAX`; sizes come unchecked from the listing.
    pub fn total_code_size(&self) -> u64 {
        self.symbols
            .iter()
            .filter(|symbol| symbol.is_code())
            .map(|symbol| symbol.size)
            .fold(0u64, u64::saturating_add)
    }

    pub fn total_data_size(&self) -> u64 {
        self.symbols
            .iter()
            .filter(|symbol| symbol.is_data())
            .map(|symbol| symbol.size)
            .fold(0u64, u64::saturating_add)
    }

    pub fn summary(&self) -> MemStatsSummary {
        MemStatsSummary {
            filename: self.size.filename.clone(),
            text_size: self.size.text,
            data_size: self.size.data,
            bss_size: self.size.bss,
            total_size: self.size.total_decimal,
            symbol_count: self.symbols.len(),
            code_symbols: self.symbols.iter().filter(|s| s.is_code()).count(),
            data_symbols: self.symbols.iter().filter(|s| s.is_data()).count(),
        }
    }
}
