use fnv::FnvHashMap;

/// Numbers variable names in order of first appearance.
#[derive(Default)]
pub struct Fresh {
    map: FnvHashMap<String, usize>,
    count: usize,
}

impl Fresh {
    pub fn get(&mut self, variable: &str) -> usize {
        if let Some(count) = self.map.get(variable) {
            return *count;
        }
        let count = self.count;
        self.count += 1;
        self.map.insert(variable.to_owned(), count);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_by_first_appearance() {
        let mut fresh = Fresh::default();
        assert_eq!(fresh.get("y"), 0);
        assert_eq!(fresh.get("x"), 1);
        assert_eq!(fresh.get("y"), 0);
    }
}
