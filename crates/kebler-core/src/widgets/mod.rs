//! Single-purpose page widgets with no cross-component state.

mod carousel;
mod catalog;
mod signup;
mod toggle;

pub use carousel::{CardSlider, FadeRotator, SliderOptions};
pub use catalog::CabinCatalog;
pub use signup::{SignupOutcome, is_valid_email, submit_signup};
pub use toggle::{Accordion, Drawer, Dropdown, DrawerLink, KeyPress};
