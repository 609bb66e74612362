//! Fire-and-forget tasks on the shell's runtime.

use std::future::Future;

/// Runs `task` on the current tokio runtime without waiting for it.
///
/// Outside a runtime the task is dropped and an error is logged under the
/// given component prefix, e.g. `"TRAY"`.
pub(crate) fn spawn_detached(component: &str, task: impl Future<Output = ()> + Send + 'static) {
    match tokio::runtime::Handle::try_current() {
        Ok(runtime) => {
            runtime.spawn(task);
        }
        Err(e) => log::error!("[{}]: No runtime to run task: {}", component, e),
    }
}
