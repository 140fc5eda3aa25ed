pub mod mappers;

#[cfg(test)]
pub(crate) mod tests;
