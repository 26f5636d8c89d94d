use tracing::debug;

/// Cabin categories, each listing its cabins. One category and one cabin
/// are active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CabinCatalog {
    cabins_per_category: Vec<usize>,
    active_category: usize,
    active_cabin: Option<usize>,
}

impl CabinCatalog {
    pub fn new(cabins_per_category: Vec<usize>) -> Self {
        let active_cabin = cabins_per_category
            .first()
            .and_then(|count| (*count > 0).then_some(0));
        CabinCatalog {
            cabins_per_category,
            active_category: 0,
            active_cabin,
        }
    }

    /// Selecting a category also selects its first cabin, if it has one.
    pub fn select_category(&mut self, category: usize) {
        let Some(&count) = self.cabins_per_category.get(category) else {
            return;
        };
        self.active_category = category;
        self.active_cabin = (count > 0).then_some(0);
        debug!(category, cabins = count, "Cabin category selected");
    }

    pub fn select_cabin(&mut self, cabin: usize) {
        let count = self
            .cabins_per_category
            .get(self.active_category)
            .copied()
            .unwrap_or(0);
        if cabin < count {
            self.active_cabin = Some(cabin);
        }
    }

    /// `None` when the page has no categories.
    pub fn active_category(&self) -> Option<usize> {
        (!self.cabins_per_category.is_empty()).then_some(self.active_category)
    }

    pub fn active_cabin(&self) -> Option<usize> {
        self.active_cabin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_switch_selects_first_cabin() {
        let mut catalog = CabinCatalog::new(vec![3, 2, 0]);
        catalog.select_cabin(2);
        assert_eq!(catalog.active_cabin(), Some(2));

        catalog.select_category(1);
        assert_eq!(catalog.active_category(), Some(1));
        assert_eq!(catalog.active_cabin(), Some(0));

        catalog.select_category(2);
        assert_eq!(catalog.active_cabin(), None);
    }

    #[test]
    fn out_of_range_clicks_are_ignored() {
        let mut catalog = CabinCatalog::new(vec![2]);
        catalog.select_category(4);
        catalog.select_cabin(5);
        assert_eq!(catalog.active_category(), Some(0));
        assert_eq!(catalog.active_cabin(), Some(0));

        assert_eq!(CabinCatalog::new(Vec::new()).active_category(), None);
    }
}
