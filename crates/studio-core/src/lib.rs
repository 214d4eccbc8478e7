#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod authority;
mod capability;
mod closure;
mod decision;
mod error;
mod hierarchy;
mod principal;
mod role;

pub use crate::authority::RoleAuthority;
pub use crate::capability::Capability;
pub use crate::closure::AccountClosurePolicy;
pub use crate::decision::Decision;
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::hierarchy::{Rank, RoleHierarchy};
pub use crate::principal::{Principal, TargetAccount};
pub use crate::role::Role;
