use rand::seq::SliceRandom;
use rand::Rng;

pub const QUOTES: &[&str] = &[
    "Focus on now, build the future.",
    "Every pomodoro is progress.",
    "Keep going, it adds up.",
    "Rest is part of the work.",
    "Manage your time, manage your life.",
    "Stay focused, shut out the noise.",
    "Small steps, steady pace.",
    "Today's effort is tomorrow's result.",
];

pub fn random_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    QUOTES.choose(rng).copied().unwrap_or_default()
}

pub fn any_quote() -> &'static str {
    random_quote(&mut rand::thread_rng())
}
