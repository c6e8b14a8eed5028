pub mod equalizer;
