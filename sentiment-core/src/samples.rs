//! Example sentences offered as one-click chips in the playground.
//!
//! Each one shows off a rule: plain polarity, negation, intensifiers,
//! punctuation and emoji.

/// `(rule demonstrated, text)` pairs.
pub fn demo_texts() -> Vec<(&'static str, &'static str)> {
    vec![
        ("polarity", "I love this game, it is so much fun."),
        ("polarity", "The ending was boring and the music was bad."),
        ("negation", "This is not good."),
        ("negation", "I am not sad at all, never been happier."),
        ("intensifier", "This is very very good!"),
        ("intensifier", "The service was extremely slow and totally annoying."),
        ("punctuation", "Wow!!! Best day ever!"),
        ("punctuation", "Is it good? Is it bad? Who knows?"),
        ("emoji", "Pizza night 🎉 😍"),
        ("emoji", "Missed the bus again 😢 👎"),
        ("comparison", "The movie was okay but the popcorn was awesome."),
    ]
}
