//! Outbound links to the upstream trading site. Every link carries a `via`
//! referral tag so upstream can attribute the traffic.

use crate::TRADE_BASE;

/// Referral tag appended to every outbound link.
pub const REFERRAL: &str = "oraculo.ar";

fn referral_query(market_id: Option<&str>) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    query.append_pair("via", REFERRAL);
    if let Some(id) = market_id {
        query.append_pair("tid", id);
    }
    query.finish()
}

/// Link to an event page.
pub fn event_url(slug: &str) -> String {
    format!("{TRADE_BASE}/event/{slug}?{}", referral_query(None))
}

/// Link to a standalone market page.
pub fn market_url(slug: &str) -> String {
    format!("{TRADE_BASE}/market/{slug}?{}", referral_query(None))
}

/// Link to an event page targeting one of its markets via the `tid`
/// parameter.
pub fn event_market_url(slug: &str, market_id: &str) -> String {
    format!("{TRADE_BASE}/event/{slug}?{}", referral_query(Some(market_id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_and_market_links_carry_referral() {
        assert_eq!(
            event_url("elecciones-2027"),
            "https://polymarket.com/event/elecciones-2027?via=oraculo.ar"
        );
        assert_eq!(
            market_url("dolar-a-2000"),
            "https://polymarket.com/market/dolar-a-2000?via=oraculo.ar"
        );
    }

    #[test]
    fn market_targeted_link_appends_tid_after_referral() {
        assert_eq!(
            event_market_url("elecciones-2027", "512329"),
            "https://polymarket.com/event/elecciones-2027?via=oraculo.ar&tid=512329"
        );
    }
}
