//! Procedural Glicol composition used when no audio file is given.
//!
//! A gated saw bass for the low bands and a fast high-pitched figure for the
//! upper bands, so all four features move.

pub const GLICOL_COMPOSITION: &str = r#"
~gate: speed 4.0 >> seq 36 _36 _~b 43
~b: choose 36 36 43 48 0
~amp: ~gate >> envperc 0.002 0.2
~pit: ~gate >> mul 261.63
~bass: saw ~pit >> mul ~amp >> lpf ~cut 3.0 >> mul 0.15
~cut: sin 0.1 >> mul 800 >> add 1200
~hgate: speed 8.0 >> seq 84 _ 91 _~h
~h: choose 84 96 91 0
~hamp: ~hgate >> envperc 0.001 0.05
~hpit: ~hgate >> mul 261.63
~hat: saw ~hpit >> mul ~hamp >> mul 0.04
~mixed: mix ~bass ~hat
o: ~mixed >> plate 0.15
"#;
