mod tests_language;
