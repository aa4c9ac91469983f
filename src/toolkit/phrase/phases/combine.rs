

/// Every `"{adjective} {noun}"` pair, adjectives in the outer loop.
pub fn generate_combinations(adjectives: &[String], nouns: &[String]) -> Vec<String> {
    let mut combinations = Vec::with_capacity(adjectives.len() * nouns.len());
    for adjective in adjectives {
        for noun in nouns {
            combinations.push(format!("{} {}", adjective, noun));
        }
    }
    combinations
}
