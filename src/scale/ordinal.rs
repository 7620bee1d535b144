//! Ordinal color scale
//!
//! Assigns each distinct key (author) a color from a categorical palette in
//! first-seen order, wrapping around when the palette runs out.

/// 20-color categorical palette (10 hues, dark then light)
pub const CATEGORY20: [&str; 20] = [
    "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c",
    "#98df8a", "#d62728", "#ff9896", "#9467bd", "#c5b0d5",
    "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f",
    "#c7c7c7", "#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
];

#[derive(Clone, Debug, Default)]
pub struct OrdinalScale {
    domain: Vec<String>,
    palette: Vec<String>,
}

impl OrdinalScale {
    pub fn new(palette: &[&str]) -> Self {
        Self {
            domain: Vec::new(),
            palette: palette.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn category20() -> Self {
        Self::new(&CATEGORY20)
    }

    /// Pre-seed the domain so colors follow a known key order
    pub fn with_domain<'a, I>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        for key in keys {
            self.index_of(key);
        }
        self
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Color for `key`, adding it to the domain if unseen
    pub fn color(&mut self, key: &str) -> &str {
        let index = self.index_of(key);
        self.color_at(index)
    }

    /// Color for a known key without growing the domain
    pub fn get(&self, key: &str) -> Option<&str> {
        self.domain
            .iter()
            .position(|k| k == key)
            .map(|index| self.color_at(index))
    }

    fn color_at(&self, index: usize) -> &str {
        if self.palette.is_empty() {
            return "black";
        }
        &self.palette[index % self.palette.len()]
    }

    fn index_of(&mut self, key: &str) -> usize {
        match self.domain.iter().position(|k| k == key) {
            Some(index) => index,
            None => {
                self.domain.push(key.to_string());
                self.domain.len() - 1
            }
        }
    }
}
