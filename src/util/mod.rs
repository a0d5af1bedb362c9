pub(crate) mod fresh;
