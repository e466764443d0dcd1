//! Ready-made variant families.
//!
//! These families double as usage references for the three creation shapes
//! the crate supports:
//!
//! - [`gui`]: an abstract factory over `Mac` and `Windows` widgets, plus
//!   dialog creators in factory-method style
//! - [`payment`]: factory-method creators driving a fixed payment template
//! - [`reference`]: two generic products whose collaboration is checked for
//!   variant compatibility

pub mod gui;
pub mod payment;
pub mod reference;
