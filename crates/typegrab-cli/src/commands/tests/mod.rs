mod support;
mod tests_files;
