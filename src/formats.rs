use serde::{Deserialize, Serialize};

/// Placeholder for any field the page did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// The purchasing options ThriftBooks sells a book in, in matching and CSV
/// column order. Fixed rather than derived from the page: every record
/// carries all eight slots, "N/A" where the page offers nothing.
pub const FORMATS: [&str; 8] = [
    "Hardcover",
    "Paperback",
    "Library Binding",
    "Like New",
    "Very Good",
    "Good",
    "Acceptable",
    "New",
];

/// One price slot per entry in [`FORMATS`], same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatPrices([String; 8]);

impl Default for FormatPrices {
    fn default() -> Self {
        Self(std::array::from_fn(|_| NOT_AVAILABLE.to_owned()))
    }
}

impl FormatPrices {
    /// Fold one price button's text into the slots.
    ///
    /// Every label contained in the text claims its slot, with the price
    /// taken as the text minus all occurrences of the label. A button like
    /// "Very Good $5" therefore also writes a mangled remainder into the
    /// bare "Good" slot; a dedicated "Good" button later in the page
    /// overwrites it.
    pub fn apply_button(&mut self, text: &str) {
        let text = text.trim();
        // TODO: match whole label tokens so "Good" stops claiming part of
        // a "Very Good" button.
        for (slot, label) in self.0.iter_mut().zip(FORMATS) {
            if text.contains(label) {
                let price = text.replace(label, "");
                let price = price.trim();
                *slot = if price.is_empty() {
                    NOT_AVAILABLE.to_owned()
                } else {
                    price.to_owned()
                };
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        FORMATS
            .iter()
            .position(|known| *known == label)
            .map(|i| self.0[i].as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// One scraped book, one CSV row.
#[derive(Debug, Clone)]
pub struct BookRecord {
    pub title: String,
    pub rating: String,
    pub url: String,
    pub prices: FormatPrices,
}

impl BookRecord {
    /// Column order is the record assembly order: the three fixed fields,
    /// then the format catalog.
    pub fn header() -> Vec<&'static str> {
        let mut header = vec!["Title", "Rating", "URL"];
        header.extend(FORMATS);
        header
    }

    pub fn row(&self) -> Vec<&str> {
        let mut row = vec![
            self.title.as_str(),
            self.rating.as_str(),
            self.url.as_str(),
        ];
        row.extend(self.prices.values());
        row
    }
}

/// One collected listing link, one line in the `links` JSONL log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRecord {
    pub index: usize,
    pub url: String,
    pub collected_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_button_keeps_text_minus_label_as_price() {
        let mut prices = FormatPrices::default();
        prices.apply_button("Paperback $9.99");

        assert_eq!(prices.get("Paperback"), Some("$9.99"));
        assert_eq!(prices.get("Hardcover"), Some(NOT_AVAILABLE));
    }

    #[test]
    fn bare_label_without_price_stores_sentinel() {
        let mut prices = FormatPrices::default();
        prices.apply_button("Hardcover");

        assert_eq!(prices.get("Hardcover"), Some(NOT_AVAILABLE));
    }

    #[test]
    fn unknown_button_text_changes_nothing() {
        let mut prices = FormatPrices::default();
        prices.apply_button("Audio CD $12.00");

        assert!(prices.values().all(|price| price == NOT_AVAILABLE));
    }

    #[test]
    fn very_good_button_also_touches_the_good_slot() {
        let mut prices = FormatPrices::default();
        prices.apply_button("Very Good $5");

        assert_eq!(prices.get("Very Good"), Some("$5"));
        // Substring matching lets the bare label claim a mangled remainder.
        assert_eq!(prices.get("Good"), Some("Very  $5"));
    }

    #[test]
    fn dedicated_good_button_overwrites_the_mangled_slot() {
        let mut prices = FormatPrices::default();
        prices.apply_button("Very Good $5");
        prices.apply_button("Good $3");

        assert_eq!(prices.get("Very Good"), Some("$5"));
        assert_eq!(prices.get("Good"), Some("$3"));
    }

    #[test]
    fn header_and_row_align() {
        let record = BookRecord {
            title: "A Title".to_owned(),
            rating: "4.2".to_owned(),
            url: "https://example.com/b/1".to_owned(),
            prices: FormatPrices::default(),
        };

        let header = BookRecord::header();
        let row = record.row();
        assert_eq!(header.len(), row.len());
        assert_eq!(header[0..3], ["Title", "Rating", "URL"]);
        assert_eq!(header[3..], FORMATS);
    }
}
