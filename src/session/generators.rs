/// Trait for generating display names for guests who did not pick one
pub trait DisplayNameGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Pet name-based display name generator
pub struct PetNameGenerator;

impl PetNameGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PetNameGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayNameGenerator for PetNameGenerator {
    fn generate(&self) -> String {
        petname::Petnames::default().generate_one(2, "-")
    }
}

/// Trait for minting user ids when the client does not supply one
pub trait UserIdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

pub struct UuidGenerator;

impl UserIdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_petname_generator() {
        let name = PetNameGenerator::new().generate();

        assert!(!name.is_empty());
        assert_eq!(name.split('-').count(), 2);
    }

    #[test]
    fn test_uuid_generator() {
        let id = UuidGenerator.generate();
        assert!(uuid::Uuid::parse_str(&id).is_ok());
        assert_ne!(id, UuidGenerator.generate());
    }
}
