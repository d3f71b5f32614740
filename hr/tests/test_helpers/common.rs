use hr::{error::HrError, ApplicationRuntime, ApplicationRuntimeBuilder};
use std::sync::Arc;
use tempfile::TempDir;

/// A runtime on an in-memory database whose uploads go to a temporary directory.
///
/// The directory is removed when the returned `TempDir` is dropped.
pub fn create_test_runtime() -> Result<(Arc<ApplicationRuntime>, TempDir), HrError> {
    let _ = env_logger::builder().is_test(true).try_init();

    let upload_dir = tempfile::tempdir()?;
    let runtime = ApplicationRuntimeBuilder::new()
        .use_in_memory_db()
        .with_upload_dir(upload_dir.path())
        .build()?;

    Ok((Arc::new(runtime), upload_dir))
}
