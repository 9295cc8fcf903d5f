//! Store colour legend for calendar grids.

use serde::{Deserialize, Serialize};

use crate::models::Store;

/// One store on the legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    /// The store id.
    pub store_id: String,
    /// The store name.
    pub name: String,
    /// Position in id order, starting at 0.
    pub index: usize,
    /// Colour token, `palette[index % palette.len()]`.
    pub color: String,
}

/// Colour assignments for a set of stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Legend {
    /// Entries ordered by store id.
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    /// The colour token of `store_id`, if it is on the legend.
    pub fn color_for(&self, store_id: &str) -> Option<&str> {
        self.entry(store_id).map(|entry| entry.color.as_str())
    }

    /// The legend entry of `store_id`.
    pub fn entry(&self, store_id: &str) -> Option<&LegendEntry> {
        self.entries
            .binary_search_by(|entry| entry.store_id.as_str().cmp(store_id))
            .ok()
            .map(|position| &self.entries[position])
    }
}

/// Assigns each store a colour from `palette`.
///
/// Stores are sorted by id and coloured round-robin, so the same store list
/// always gives the same colours whatever order it arrives in. Duplicate ids
/// are listed once. An empty palette gives empty colour tokens.
///
/// # Examples
///
/// ```
/// use roster_engine::aggregation::compute_legend;
/// use roster_engine::models::Store;
///
/// let store = |id: &str| Store {
///     id: id.to_string(),
///     name: id.to_uppercase(),
///     location: String::new(),
///     hours: Default::default(),
/// };
/// let stores = vec![store("store_c"), store("store_a"), store("store_b")];
/// let palette = vec!["red".to_string(), "blue".to_string()];
///
/// let legend = compute_legend(&stores, &palette);
/// assert_eq!(legend.color_for("store_a"), Some("red"));
/// assert_eq!(legend.color_for("store_b"), Some("blue"));
/// assert_eq!(legend.color_for("store_c"), Some("red"));
/// ```
pub fn compute_legend<'a, I>(stores: I, palette: &[String]) -> Legend
where
    I: IntoIterator<Item = &'a Store>,
{
    let mut sorted: Vec<&Store> = stores.into_iter().collect();
    sorted.sort_by(|a, b| a.id.cmp(&b.id));
    sorted.dedup_by(|a, b| a.id == b.id);

    let entries = sorted
        .into_iter()
        .enumerate()
        .map(|(index, store)| LegendEntry {
            store_id: store.id.clone(),
            name: store.name.clone(),
            index,
            color: palette
                .get(index.checked_rem(palette.len()).unwrap_or(0))
                .cloned()
                .unwrap_or_default(),
        })
        .collect();

    Legend { entries }
}
