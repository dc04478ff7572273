//! The mandatory signing property keys.

/// One of the four keys a release signing config requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SigningKey {
    StoreFile,
    StorePassword,
    KeyAlias,
    KeyPassword,
}

impl SigningKey {
    /// All keys, in the order they are looked up.
    pub const ALL: [SigningKey; 4] = [
        SigningKey::StoreFile,
        SigningKey::StorePassword,
        SigningKey::KeyAlias,
        SigningKey::KeyPassword,
    ];

    /// The property name as written in the properties file.
    pub fn as_str(&self) -> &'static str {
        match self {
            SigningKey::StoreFile => "storeFile",
            SigningKey::StorePassword => "storePassword",
            SigningKey::KeyAlias => "keyAlias",
            SigningKey::KeyPassword => "keyPassword",
        }
    }
}

impl std::str::FromStr for SigningKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SigningKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("Unknown signing key: {}", s))
    }
}

impl std::fmt::Display for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_order() {
        let names: Vec<_> = SigningKey::ALL.iter().map(SigningKey::as_str).collect();
        assert_eq!(names, ["storeFile", "storePassword", "keyAlias", "keyPassword"]);
    }

    #[test]
    fn test_from_str_is_case_sensitive() {
        assert_eq!("keyAlias".parse::<SigningKey>(), Ok(SigningKey::KeyAlias));
        assert!("keyalias".parse::<SigningKey>().is_err());
    }
}
