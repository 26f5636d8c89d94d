use crate::config::LayoutPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use ts_rs::TS;

/// Element counts found in the page markup. `dots == 0` means no progress dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SectionCounts {
    pub sections: usize,
    pub menu_entries: usize,
    #[serde(default)]
    pub dots: usize,
    #[serde(default)]
    pub paging_groups: usize,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("{menu_entries} menu entries for {sections} sections; unmatched sections would be unreachable")]
    MenuMismatch {
        menu_entries: usize,
        sections: usize,
    },

    #[error("{dots} progress dots for {sections} sections")]
    DotMismatch { dots: usize, sections: usize },
}

/// Validated navigation bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SectionLayout {
    pub(crate) counts: SectionCounts,
    pub(crate) max_index: usize,
}

impl SectionLayout {
    /// `Ok(None)` when there is nothing to navigate (no sections or no menu).
    pub(crate) fn resolve(
        counts: SectionCounts,
        policy: LayoutPolicy,
    ) -> Result<Option<Self>, LayoutError> {
        if counts.sections == 0 || counts.menu_entries == 0 {
            return Ok(None);
        }

        let mut navigable = counts.sections.min(counts.menu_entries);
        if counts.dots > 0 {
            navigable = navigable.min(counts.dots);
        }

        if navigable != counts.sections || navigable != counts.menu_entries {
            match policy {
                LayoutPolicy::Strict if counts.menu_entries != counts.sections => {
                    return Err(LayoutError::MenuMismatch {
                        menu_entries: counts.menu_entries,
                        sections: counts.sections,
                    });
                }
                LayoutPolicy::Strict => {
                    return Err(LayoutError::DotMismatch {
                        dots: counts.dots,
                        sections: counts.sections,
                    });
                }
                LayoutPolicy::Clamp => warn!(
                    sections = counts.sections,
                    menu_entries = counts.menu_entries,
                    dots = counts.dots,
                    navigable,
                    "Section lists differ in length; navigating over the shortest"
                ),
            }
        } else if counts.dots > navigable && policy == LayoutPolicy::Strict {
            return Err(LayoutError::DotMismatch {
                dots: counts.dots,
                sections: counts.sections,
            });
        }

        Ok(Some(SectionLayout {
            counts,
            max_index: navigable - 1,
        }))
    }

    pub(crate) fn has_dots(&self) -> bool {
        self.counts.dots > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(sections: usize, menu_entries: usize, dots: usize) -> SectionCounts {
        SectionCounts {
            sections,
            menu_entries,
            dots,
            paging_groups: 1,
        }
    }

    #[test]
    fn matching_lists_resolve_to_last_index() {
        let layout = SectionLayout::resolve(counts(3, 3, 3), LayoutPolicy::Strict)
            .expect("valid layout")
            .expect("active layout");
        assert_eq!(layout.max_index, 2);
        assert!(layout.has_dots());
    }

    #[test]
    fn dots_are_optional() {
        let layout = SectionLayout::resolve(counts(4, 4, 0), LayoutPolicy::Strict)
            .expect("valid layout")
            .expect("active layout");
        assert_eq!(layout.max_index, 3);
        assert!(!layout.has_dots());
    }

    #[test]
    fn empty_lists_are_inert_not_errors() {
        assert_eq!(
            SectionLayout::resolve(counts(0, 3, 3), LayoutPolicy::Strict),
            Ok(None)
        );
        assert_eq!(
            SectionLayout::resolve(counts(3, 0, 0), LayoutPolicy::Strict),
            Ok(None)
        );
    }

    #[test]
    fn strict_policy_rejects_hidden_sections() {
        assert_eq!(
            SectionLayout::resolve(counts(4, 3, 0), LayoutPolicy::Strict),
            Err(LayoutError::MenuMismatch {
                menu_entries: 3,
                sections: 4,
            })
        );
        assert_eq!(
            SectionLayout::resolve(counts(3, 3, 2), LayoutPolicy::Strict),
            Err(LayoutError::DotMismatch {
                dots: 2,
                sections: 3,
            })
        );
        assert_eq!(
            SectionLayout::resolve(counts(3, 3, 5), LayoutPolicy::Strict),
            Err(LayoutError::DotMismatch {
                dots: 5,
                sections: 3,
            })
        );
    }

    #[test]
    fn clamp_policy_takes_the_shortest_list() {
        let layout = SectionLayout::resolve(counts(5, 4, 3), LayoutPolicy::Clamp)
            .expect("clamped layout")
            .expect("active layout");
        assert_eq!(layout.max_index, 2);

        let layout = SectionLayout::resolve(counts(5, 4, 0), LayoutPolicy::Clamp)
            .expect("clamped layout")
            .expect("active layout");
        assert_eq!(layout.max_index, 3);
    }
}
