//! Mapping from ticket category to the suggested responsible technician

use std::collections::HashMap;

/// Fallback assignee for categories without a dedicated specialist.
pub const DEFAULT_TECHNICIAN: &str = "Coordinador de Soporte";

/// Assignee for tickets routed through the "other cause" override.
pub const REMOTE_SUPPORT_TECHNICIAN: &str = "Técnico en línea (Soporte Remoto)";

/// Category → technician directory with a fixed default
#[derive(Debug, Clone)]
pub struct TechnicianDirectory {
    assignments: HashMap<String, String>,
}

impl TechnicianDirectory {
    /// The standard support-team assignments.
    pub fn standard() -> Self {
        let assignments = [
            ("Hardware", "Técnico Juan (Especialista en HW/Periféricos)"),
            ("Red", "Técnica María (Especialista en Redes/Conectividad)"),
            (
                "Software",
                "Técnico Pedro (Especialista en Apps/Sistema Operativo)",
            ),
            ("Permisos", "Técnica Ana (Administradora de Accesos)"),
            ("Seguridad", "Técnico Luis (Especialista en Ciberseguridad)"),
            (crate::engine::UNCLASSIFIED_CATEGORY, DEFAULT_TECHNICIAN),
        ]
        .into_iter()
        .map(|(category, technician)| (category.to_string(), technician.to_string()))
        .collect();

        Self { assignments }
    }

    /// Technician for a category, falling back to the support coordinator.
    pub fn assign(&self, category: &str) -> &str {
        self.assignments
            .get(category)
            .map(String::as_str)
            .unwrap_or(DEFAULT_TECHNICIAN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_categories_have_specialists() {
        let directory = TechnicianDirectory::standard();
        assert_eq!(
            directory.assign("Hardware"),
            "Técnico Juan (Especialista en HW/Periféricos)"
        );
        assert_eq!(
            directory.assign("Red"),
            "Técnica María (Especialista en Redes/Conectividad)"
        );
        assert_eq!(
            directory.assign("Seguridad"),
            "Técnico Luis (Especialista en Ciberseguridad)"
        );
    }

    #[test]
    fn test_unknown_category_falls_back_to_coordinator() {
        let directory = TechnicianDirectory::standard();
        assert_eq!(directory.assign("Impresoras"), DEFAULT_TECHNICIAN);
        assert_eq!(directory.assign(""), DEFAULT_TECHNICIAN);
    }

    #[test]
    fn test_unclassified_maps_to_coordinator() {
        let directory = TechnicianDirectory::standard();
        assert_eq!(
            directory.assign(crate::engine::UNCLASSIFIED_CATEGORY),
            DEFAULT_TECHNICIAN
        );
    }
}
