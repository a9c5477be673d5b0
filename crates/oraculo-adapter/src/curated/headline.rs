//! Primary-outcome selection: collapse an event's market list to the one
//! market that best represents it on a compact card.

use std::cmp::Ordering;

use crate::types::Market;

/// The affirmative outcome of a market, located by label.
#[derive(Clone, Debug, PartialEq)]
pub struct YesOutcome {
    /// Position within the market's outcome sequence.
    pub index: usize,
    /// The label as upstream spelled it (`"Sí"`, `"YES"`, ...).
    pub label: String,
    /// Implied-probability price in [0, 1].
    pub price: f64,
    /// The same price expressed as a percentage.
    pub probability: f64,
}

/// A selected headline market, with its yes-outcome when selection was
/// probability-driven. `yes` is `None` only when the whole list lacked an
/// affirmative outcome and selection fell back to volume.
#[derive(Clone, Debug)]
pub struct Headline<'a> {
    pub market: &'a Market,
    pub yes: Option<YesOutcome>,
}

/// Lowercase a label and fold Spanish diacritics so "SÍ", "sí" and "Si"
/// compare equal.
fn normalized(label: &str) -> String {
    label
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' | 'ü' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// Position of the first outcome whose normalized label is `"si"` or
/// `"yes"`, if any.
pub fn yes_index(market: &Market) -> Option<usize> {
    market.outcomes.iter().position(|label| {
        let folded = normalized(label);
        folded == "si" || folded == "yes"
    })
}

/// Find a market's affirmative outcome: the first yes-labeled outcome, with
/// its price. A yes-labeled outcome without a parsable price at the same
/// index is no match.
pub fn yes_outcome(market: &Market) -> Option<YesOutcome> {
    let index = yes_index(market)?;
    let price = market.price_at(index)?;
    Some(YesOutcome {
        index,
        label: market.outcomes[index].clone(),
        price,
        probability: price * 100.0,
    })
}

/// Pick the representative market out of an event's list.
///
/// Markets with a yes-outcome compete on probability; exact probability ties
/// go to the strictly greater numeric volume, and anything still tied keeps
/// the earliest market. When no market has a yes-outcome at all, the
/// greatest numeric volume wins (earliest on ties). Empty input selects
/// nothing; non-empty input always selects.
pub fn select_primary(markets: &[Market]) -> Option<Headline<'_>> {
    let mut best: Option<(usize, YesOutcome, f64)> = None;
    for (i, market) in markets.iter().enumerate() {
        let Some(yes) = yes_outcome(market) else { continue };
        let volume = market.volume_num();
        let replaces = match &best {
            None => true,
            Some((_, best_yes, best_volume)) => {
                match yes.probability.total_cmp(&best_yes.probability) {
                    Ordering::Greater => true,
                    Ordering::Equal => volume.total_cmp(best_volume) == Ordering::Greater,
                    Ordering::Less => false,
                }
            }
        };
        if replaces {
            best = Some((i, yes, volume));
        }
    }
    if let Some((i, yes, _)) = best {
        return Some(Headline { market: &markets[i], yes: Some(yes) });
    }

    // No affirmative outcome anywhere: fall back to the busiest market.
    let mut fallback: Option<(usize, f64)> = None;
    for (i, market) in markets.iter().enumerate() {
        let volume = market.volume_num();
        let replaces = match fallback {
            None => true,
            Some((_, best_volume)) => volume.total_cmp(&best_volume) == Ordering::Greater,
        };
        if replaces {
            fallback = Some((i, volume));
        }
    }
    fallback.map(|(i, _)| Headline { market: &markets[i], yes: None })
}
