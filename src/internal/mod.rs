pub mod add_targets;
pub mod exec_cmd;
pub mod mutator;
pub mod patch;
pub mod patch_all;
pub mod rollback;
pub mod search;
pub mod select;
pub mod session;
pub mod session_patch;
