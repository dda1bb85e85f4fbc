/// One entry of a TLE text file, before any field decoding
/// https://en.wikipedia.org/wiki/Two-line_element_set
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct RawTle {
    /// Title line of a three-line set, with any leading "0 " removed
    pub name: Option<String>,
    pub line1: String,
    pub line2: String,
}

impl RawTle {
    pub fn new<L1: Into<String>, L2: Into<String>>(line1: L1, line2: L2) -> Self {
        Self {
            name: None,
            line1: line1.into(),
            line2: line2.into(),
        }
    }

    pub fn with_name<N: Into<String>>(mut self, name: N) -> Self {
        self.name = Some(name.into());
        self
    }
}
