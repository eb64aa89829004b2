pub mod fake_word_source;
