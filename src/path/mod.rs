mod resolver;

pub use resolver::{is_executable, SearchPath, MAX_PATH_LEN};
