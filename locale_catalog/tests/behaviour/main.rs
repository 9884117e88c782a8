//! Behavioural tests for `locale_catalog` using `rstest-bdd`.
//!
//! Fixtures live in [`fixtures`], step implementations in [`steps`], and
//! [`scenarios`] binds the `.feature` files to them.

mod fixtures;
mod scenarios;
mod steps;
