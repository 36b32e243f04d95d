// Shared input texts for integration tests

#![allow(dead_code)]

/// Paragraph mixing every kind the pipeline knows
pub const MIXED_TEXT: &str = "Der 2. Termin ist am 15. Januar 2024 um 14:30 Uhr in 4410 Liestal. \
Anmeldung unter Tel. 061 123 45 67 oder +41 23 056 789. Die Gebühr beträgt CHF 25.50, \
das Modell X500 steht auf dem Parkplatz neben BS 12345. Seit 1983 kamen 1'250 Gäste.";

/// Text whose output must not change when converted a second time
pub const STABLE_TEXT: &str = "Ich habe 5 Äpfel und 12 Birnen. Die Zahl ist 100. \
Der 1. Platz geht nach 4410 Liestal. Am 3. März 1999 um 9 Uhr.";

pub const ALREADY_SPOKEN: &str = "Ich habe fünf Äpfel.";
