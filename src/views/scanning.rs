pub fn render() -> String {
    "Scanning...\nIdentifying breed characteristics\n".to_string()
}
