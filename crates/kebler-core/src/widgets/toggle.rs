use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

/// Keys the toggle widgets react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum KeyPress {
    Enter,
    Space,
    Escape,
    Other,
}

impl KeyPress {
    fn activates(self) -> bool {
        matches!(self, KeyPress::Enter | KeyPress::Space)
    }
}

/// FAQ list where at most one answer is expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accordion {
    items: usize,
    open: Option<usize>,
}

impl Accordion {
    pub fn new(items: usize) -> Self {
        Accordion { items, open: None }
    }

    /// Clicking the open item collapses it; any other item replaces it.
    pub fn toggle(&mut self, index: usize) {
        if index >= self.items {
            return;
        }
        self.open = if self.open == Some(index) {
            None
        } else {
            Some(index)
        };
        debug!(index, open = ?self.open, "FAQ toggled");
    }

    pub fn key_press(&mut self, index: usize, key: KeyPress) {
        if key.activates() {
            self.toggle(index);
        }
    }

    pub fn open_item(&self) -> Option<usize> {
        self.open
    }

    /// `aria-expanded` for one item.
    pub fn is_expanded(&self, index: usize) -> bool {
        self.open == Some(index)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dropdown {
    expanded: bool,
}

impl Dropdown {
    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    /// A document click that landed outside both toggle and menu.
    pub fn click_outside(&mut self) {
        self.expanded = false;
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }
}

/// What a tapped drawer link carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case", tag = "kind")]
#[ts(export)]
pub enum DrawerLink {
    Plain,
    Submenu { index: usize },
}

/// Mobile navigation drawer behind the hamburger button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drawer {
    open: bool,
    submenus: Vec<bool>,
}

impl Drawer {
    pub fn new(submenus: usize) -> Self {
        Drawer {
            open: false,
            submenus: vec![false; submenus],
        }
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Submenu links expand in place; plain links navigate and close.
    pub fn tap_link(&mut self, link: DrawerLink) {
        match link {
            DrawerLink::Plain => self.close(),
            DrawerLink::Submenu { index } => {
                if let Some(submenu) = self.submenus.get_mut(index) {
                    *submenu = !*submenu;
                }
            }
        }
    }

    pub fn key_press(&mut self, key: KeyPress) {
        if key == KeyPress::Escape && self.open {
            self.close();
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open_submenus(&self) -> Vec<usize> {
        self.submenus
            .iter()
            .enumerate()
            .filter_map(|(idx, open)| open.then_some(idx))
            .collect()
    }
}
