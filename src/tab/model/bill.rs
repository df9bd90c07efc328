use crate::tab::util::amount::round_cents;
use crate::tab::util::time;
use chrono::{DateTime, Utc};
use derive_more::{Display, Error};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// width of the label column in a rendered bill
const LABEL_WIDTH: usize = 25;
/// longest name that still fits a 255 byte file name once `.txt` is appended
const MAX_NAME_BYTES: usize = 251;
pub(crate) const CURRENCY_UNIT: &str = "Rupees";

#[derive(Debug, Display, Error, PartialEq, Eq)]
pub(crate) enum InvalidName {
    #[display("bill name must not be empty")]
    Empty,
    #[display("bill name {name} cannot be used as a file name")]
    NotAFileName { name: String },
}

/// One customer's open tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Bill {
    name: String,
    /// item name to unit price, kept sorted by name
    items: BTreeMap<String, Decimal>,
    tip: Decimal,
    opened_at: DateTime<Utc>,
}

impl Bill {
    /// Open an empty bill with no tip.
    pub fn create(name: impl Into<String>) -> Result<Self, InvalidName> {
        let name = name.into();
        if name.is_empty() {
            return Err(InvalidName::Empty);
        }
        // the name doubles as the persisted file stem
        if name.contains(['/', '\\', '\0'])
            || name == "."
            || name == ".."
            || name.len() > MAX_NAME_BYTES
        {
            return Err(InvalidName::NotAFileName { name });
        }
        Ok(Self {
            name,
            items: BTreeMap::new(),
            tip: Decimal::ZERO,
            opened_at: time::helper::get_utc_now(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn items(&self) -> &BTreeMap<String, Decimal> {
        &self.items
    }

    pub fn tip(&self) -> Decimal {
        self.tip
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Insert an item, replacing the price if the name is already on the bill.
    pub fn add_item(&mut self, name: impl Into<String>, price: Decimal) {
        self.items.insert(name.into(), price);
    }

    pub fn set_tip(&mut self, tip: Decimal) {
        self.tip = tip;
    }

    pub fn total(&self) -> Decimal {
        self.items
            .values()
            .fold(self.tip, |acc, price| acc.saturating_add(*price))
    }

    /// Human readable breakdown, items ordered by name. Tip and total are rounded to cents.
    pub fn render(&self) -> String {
        let mut out = String::from("Your Bill Breakdown:\n\n");
        for (name, price) in &self.items {
            out.push_str(&format!(
                "{:<width$} ...{} {}\n",
                format!("{name}:"),
                price.normalize(),
                CURRENCY_UNIT,
                width = LABEL_WIDTH,
            ));
        }
        out.push_str(&format!(
            "\n{:<width$} ...{:.2} {}\n",
            "Tip:",
            round_cents(self.tip),
            CURRENCY_UNIT,
            width = LABEL_WIDTH,
        ));
        out.push_str(&format!(
            "{:<width$} ...{:.2} {}\n",
            "Total:",
            round_cents(self.total()),
            CURRENCY_UNIT,
            width = LABEL_WIDTH,
        ));
        out
    }
}
