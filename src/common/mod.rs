mod fs;
mod io;
mod log;

pub use fs::{ensure_dir_exists, file_name_of, list_geojson_files, require_dir_exists};
pub use io::{read_json_file, read_json_file_if_exists, write_json_atomic, JsonStyle, PendingWrite};
pub use log::init_logging;
