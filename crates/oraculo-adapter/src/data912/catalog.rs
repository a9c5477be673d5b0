//! Board catalog: which instruments each quote board shows and under what
//! names. Symbols outside a board's whitelist are dropped from its feed.

/// Argentine ADRs shown on the equity board.
pub const WHITELISTED_ADRS: [&str; 10] =
    ["CEPU", "SUPV", "BMA", "PAM", "EDN", "GGAL", "BBAR", "VIST", "YPF", "IRS"];

/// USD-series sovereign bonds shown on the bond board.
pub const WHITELISTED_BONDS: [&str; 8] =
    ["AL30D", "AL29D", "GD30D", "AL35D", "GD35D", "AE38D", "GD41D", "AL41D"];

/// A live quote board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Board {
    /// US-listed Argentine ADRs.
    Adrs,
    /// Argentine sovereign bonds.
    Bonds,
}

impl Board {
    /// Endpoint path under the data912 base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Board::Adrs => "/live/usa_adrs",
            Board::Bonds => "/live/arg_bonds",
        }
    }

    /// Symbols this board displays.
    pub fn whitelist(&self) -> &'static [&'static str] {
        match self {
            Board::Adrs => &WHITELISTED_ADRS,
            Board::Bonds => &WHITELISTED_BONDS,
        }
    }

    /// Board heading as rendered.
    pub fn title(&self) -> &'static str {
        match self {
            Board::Adrs => "ADRs Argentinas",
            Board::Bonds => "Bonos Argentinos",
        }
    }

    /// Full instrument name for a symbol. Unknown symbols fall back to the
    /// symbol itself.
    pub fn display_name<'a>(&self, symbol: &'a str) -> &'a str {
        match self {
            Board::Adrs => match symbol {
                "CEPU" => "Central Puerto",
                "SUPV" => "Grupo Supervielle",
                "BMA" => "Banco Macro",
                "PAM" => "Pampa Energía",
                "EDN" => "Edenor",
                "GGAL" => "Grupo Financiero Galicia",
                "BBAR" => "BBVA Argentina",
                "VIST" => "Vista Energy",
                "YPF" => "YPF",
                "IRS" => "IRSA",
                other => other,
            },
            Board::Bonds => match symbol {
                "AL30D" => "Bono Argentina 2030",
                "AL29D" => "Bono Argentina 2029",
                "GD30D" => "Global 2030",
                "AL35D" => "Bono Argentina 2035",
                "GD35D" => "Global 2035",
                "AE38D" => "Bono Argentina 2038",
                "GD41D" => "Global 2041",
                "AL41D" => "Bono Argentina 2041",
                other => other,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boards_know_their_paths_and_whitelists() {
        assert_eq!(Board::Adrs.path(), "/live/usa_adrs");
        assert_eq!(Board::Bonds.path(), "/live/arg_bonds");
        assert_eq!(Board::Adrs.whitelist().len(), 10);
        assert_eq!(Board::Bonds.whitelist().len(), 8);
        assert!(Board::Adrs.whitelist().contains(&"GGAL"));
        assert!(Board::Bonds.whitelist().contains(&"AL30D"));
    }

    #[test]
    fn display_names_cover_whitelists_with_symbol_fallback() {
        for symbol in Board::Adrs.whitelist() {
            assert_ne!(Board::Adrs.display_name(symbol), "");
        }
        assert_eq!(Board::Adrs.display_name("GGAL"), "Grupo Financiero Galicia");
        assert_eq!(Board::Bonds.display_name("GD35D"), "Global 2035");
        assert_eq!(Board::Bonds.display_name("ZZZ"), "ZZZ");
    }
}
