// ── Cart composition view ──
//
// Pure composition of a fetched cart into what the cart page shows. The
// boundary calls that change the cart live on `Storefront`.

use serde::Serialize;

use crate::codec;
use crate::countdown::Countdown;
use crate::model::{Cart, Money, Offer, Product};

/// One removable line with its decoded offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    pub line_id: String,
    pub offer: Offer,
}

/// A cart line that is a bonus add-on, with its `"Choice X"` label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BonusLine {
    pub line_id: String,
    pub label: String,
    pub title: String,
}

/// What to show when the cart has nothing in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub message: &'static str,
    pub action: &'static str,
    pub target: &'static str,
}

const EMPTY_STATE: EmptyState = EmptyState {
    message: "Your cart is empty",
    action: "Find Destination",
    target: "/",
};

#[derive(Debug, Clone, Serialize)]
pub struct CartSummary {
    pub is_empty: bool,
    /// Offer of the last line, driving the summary panel.
    pub active_offer: Option<Offer>,
    #[serde(skip)]
    pub countdown: Countdown,
    pub lines: Vec<SummaryLine>,
    pub bonus_lines: Vec<BonusLine>,
    /// Every line id, for "clear cart".
    pub line_ids: Vec<String>,
    pub checkout_url: Option<String>,
    pub subtotal: Option<Money>,
}

impl CartSummary {
    /// Compose the cart view.
    ///
    /// Bonus lines are matched on the stored, undefaulted offer title
    /// against the titles of `bonus_products`.
    pub fn compose(cart: &Cart, bonus_products: &[Product]) -> Self {
        let active_offer = codec::active_line(cart).map(codec::decode);
        let countdown = Countdown::new(active_offer.as_ref().and_then(|o| o.expires_at));

        let lines = cart
            .lines
            .iter()
            .map(|line| SummaryLine {
                line_id: line.id.clone(),
                offer: codec::decode(line),
            })
            .collect();

        let bonus_lines = cart
            .lines
            .iter()
            .filter_map(|line| {
                let title = codec::offer_title(&line.attributes)?;
                bonus_products
                    .iter()
                    .any(|p| p.title == title)
                    .then(|| (line.id.clone(), title.to_owned()))
            })
            .enumerate()
            .map(|(i, (line_id, title))| BonusLine {
                line_id,
                label: crate::catalog::bonus_label(i),
                title,
            })
            .collect();

        Self {
            is_empty: cart.is_empty(),
            active_offer,
            countdown,
            lines,
            bonus_lines,
            line_ids: cart.line_ids(),
            checkout_url: cart.checkout_url.clone(),
            subtotal: cart.subtotal.clone(),
        }
    }

    /// The "Find Destination" prompt, when there is nothing to show.
    pub fn empty_state(&self) -> Option<EmptyState> {
        self.is_empty.then_some(EMPTY_STATE)
    }
}
