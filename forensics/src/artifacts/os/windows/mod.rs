pub mod accounts;
mod activity;
pub(crate) mod artifacts;
mod bam;
pub mod error;
mod network;
mod profiles;
mod shellitems;
mod storage;
mod systeminfo;
mod userassist;
