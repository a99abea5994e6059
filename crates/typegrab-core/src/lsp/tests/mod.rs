mod tests_config;
mod tests_tree;
