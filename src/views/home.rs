pub fn render() -> String {
    [
        "What breed is that?",
        "",
        "Curious about a dog's heritage? Let our AI analyze the breed characteristics instantly.",
        "",
        "  scan <file>   Take or upload a photo (JPG, PNG, WEBP)",
        "  recall        Recall a previous scan by its 3-digit identifier",
        "  quit          Leave",
        "",
    ]
    .join("\n")
}
