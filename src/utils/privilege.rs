/// Whether the process runs with an effective uid of 0. Patching files
/// under /usr/share needs it; rollback of user files does not.
pub fn is_root() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail
    unsafe { libc::geteuid() == 0 }
}
