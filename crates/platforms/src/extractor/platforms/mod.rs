pub mod afreeca;
