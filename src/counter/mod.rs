mod lines;

pub use lines::{count_file_lines, count_lines};
