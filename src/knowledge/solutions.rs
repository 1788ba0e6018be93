//! Suggested-solution catalog
//!
//! Two lookup tables, both keyed by rule id first and category second: a
//! single-line variant and a paired variant capped at two entries. The
//! rule-specific text wins over the category fallback whenever the rule id
//! is known, even when the caller overrode the category afterwards.

use std::collections::HashMap;

use crate::engine::UNCLASSIFIED_CATEGORY;
use crate::knowledge::OTHER_CAUSE_CATEGORY;

const NO_SOLUTION_FALLBACK: &str = "No hay una solución sugerida disponible.";
const NO_SUGGESTIONS_FALLBACK: [&str; 2] = ["No hay sugerencias", "—"];

/// Maximum entries returned by the paired lookup.
const SUGGESTION_LIMIT: usize = 2;

/// Authored suggestion tables for rules and categories
#[derive(Debug, Clone)]
pub struct SolutionCatalog {
    single_by_rule: HashMap<String, String>,
    single_by_category: HashMap<String, String>,
    pair_by_rule: HashMap<String, Vec<String>>,
    pair_by_category: HashMap<String, Vec<String>>,
}

impl SolutionCatalog {
    /// The standard authored catalog.
    pub fn standard() -> Self {
        let single_by_rule = owned_map([
            // Hardware
            (
                "R-HW-01",
                "Probar con otra toma/cable, revisar PSU y placa base con tester; si no enciende, escalar a diagnóstico de HW.",
            ),
            (
                "R-HW-02",
                "Probar periférico en otro puerto/equipo; si falla, reemplazo. Actualizar/instalar drivers genéricos si aplica.",
            ),
            (
                "R-HW-VID-01",
                "Reinstalar drivers con DDU, verificar alimentación PCIe y temperaturas; si persisten artefactos/pantallazos, evaluar reemplazo de GPU.",
            ),
            (
                "R-HW-RAM-01",
                "Ejecutar MemTest, probar módulos individualmente y reemplazar el módulo defectuoso si falla.",
            ),
            (
                "R-HW-DISK-01",
                "Respaldar datos, revisar SMART/diagnóstico del fabricante; reemplazar unidad si persisten errores.",
            ),
            (
                "R-HW-MON-01",
                "Verificar alimentación y entrada de video; probar con otro cable/monitor para descartar.",
            ),
            // Red
            (
                "R-RED-01",
                "Olvidar/redescubrir red, renovar IP (DHCP), reiniciar router/switch; validar DNS/puerta de enlace.",
            ),
            // Software
            (
                "R-SW-01",
                "Actualizar app/SO, revisar logs del visor de eventos, ejecutar en modo seguro/limpio; reinstalar si persiste.",
            ),
            (
                "R-SW-CORP-01",
                "Revisar logs/dependencias, ejecutar reparación; restaurar backup validado y coordinar con equipo de la aplicación.",
            ),
            // Permisos
            (
                "R-PM-01",
                "Solicitar elevación o permisos necesarios; validar políticas (GPO/AppLocker) y listas de control de acceso.",
            ),
            // Seguridad
            (
                "R-SEC-01",
                "No abrir enlaces/adjuntos, reportar a seguridad, aislar equipo y ejecutar escaneo avanzado (EDR/AV).",
            ),
        ]);

        let single_by_category = owned_map([
            (
                "Red",
                "Verificar conectividad física/lógica, renovar IP y reiniciar equipos de red.",
            ),
            (
                "Hardware",
                "Ejecutar diagnóstico de hardware, revisar conexiones y reemplazar el componente defectuoso.",
            ),
            (
                "Software",
                "Actualizar o reinstalar software; revisar compatibilidad y dependencias.",
            ),
            (
                "Seguridad",
                "Realizar análisis completo, cambiar credenciales y aplicar políticas de hardening.",
            ),
            (
                "Permisos",
                "Revisar pertenencia a grupos/roles y políticas de instalación/acceso.",
            ),
            (
                UNCLASSIFIED_CATEGORY,
                "Revisar detalles y solicitar información adicional al usuario.",
            ),
            (
                OTHER_CAUSE_CATEGORY,
                "Derivar a soporte remoto para triage y diagnóstico guiado.",
            ),
        ]);

        let pair_by_rule = owned_pair_map([
            // Hardware
            (
                "R-HW-01",
                [
                    "Revisar/medir PSU y conexiones internas.",
                    "Probar fuera del gabinete con configuración mínima (placa+CPU+1 RAM).",
                ],
            ),
            (
                "R-HW-02",
                [
                    "Probar en otro equipo/puerto y reinstalar drivers.",
                    "Reemplazar periférico si falla en pruebas cruzadas.",
                ],
            ),
            (
                "R-HW-VID-01",
                [
                    "Reinstalar drivers con DDU en modo seguro.",
                    "Verificar alimentación PCIe/temperaturas y probar otro cable/monitor.",
                ],
            ),
            (
                "R-HW-RAM-01",
                [
                    "Ejecutar MemTest/Diagnóstico de memoria.",
                    "Probar módulos individualmente y reemplazar el defectuoso.",
                ],
            ),
            (
                "R-HW-DISK-01",
                [
                    "Respaldar datos y revisar SMART/diagnóstico del fabricante.",
                    "Cambiar cable/puerto y reemplazar unidad si persisten errores.",
                ],
            ),
            (
                "R-HW-MON-01",
                [
                    "Verificar entrada seleccionada y probar otro cable/monitor.",
                    "Actualizar/reinstalar drivers de video.",
                ],
            ),
            (
                "R-HW-PSU-01",
                [
                    "Probar PSU con tester o reemplazo temporal.",
                    "Verificar cables del panel frontal y corto en periféricos.",
                ],
            ),
            (
                "R-HW-THERM-01",
                [
                    "Limpiar ventiladores/disipadores y renovar pasta térmica.",
                    "Revisar flujo de aire y perfiles de ventilación en BIOS/OS.",
                ],
            ),
            // Red
            (
                "R-RED-01",
                [
                    "Olvidar y reconectar a la red; renovar IP/DNS.",
                    "Reiniciar router/AP o probar por cable.",
                ],
            ),
            // Software
            (
                "R-SW-01",
                [
                    "Actualizar app/SO y revisar conflictos en inicio limpio.",
                    "Reinstalar o reparar la aplicación.",
                ],
            ),
            (
                "R-SW-UPD-01",
                [
                    "Limpiar caché de actualizaciones y reiniciar servicios.",
                    "Aplicar manualmente el parche/installer oficial.",
                ],
            ),
            (
                "R-SW-COMP-01",
                [
                    "Ejecutar en compatibilidad o usar versión soportada.",
                    "Revisar dependencias/SDK y documentación del proveedor.",
                ],
            ),
            (
                "R-SW-CORP-01",
                [
                    "Revisar logs y dependencias; ejecutar reparación.",
                    "Coordinar restauración de backup validado.",
                ],
            ),
            // Permisos
            (
                "R-PM-01",
                [
                    "Validar rol/grupos y solicitar elevación controlada.",
                    "Revisar GPO/AppLocker y política de instalación.",
                ],
            ),
            // Seguridad
            (
                "R-SEC-01",
                [
                    "No interactuar; reportar y aislar equipo.",
                    "Ejecutar escaneo EDR/AV y cambio de credenciales.",
                ],
            ),
            (
                "R-SEC-MAL-01",
                [
                    "Aislar el equipo y ejecutar escaneo completo.",
                    "Restaurar sistema/archivos desde respaldo confiable.",
                ],
            ),
        ]);

        let pair_by_category = owned_pair_map([
            (
                "Hardware",
                [
                    "Revisar conexiones/diagnóstico del componente.",
                    "Probar reemplazo temporal o escalar a laboratorio.",
                ],
            ),
            (
                "Red",
                [
                    "Renovar IP/DNS y revisar credenciales.",
                    "Reiniciar equipo de red o escalar a NOC.",
                ],
            ),
            (
                "Software",
                [
                    "Actualizar/reparar aplicación y dependencias.",
                    "Reinstalar o usar versión soportada.",
                ],
            ),
            (
                "Permisos",
                [
                    "Solicitar elevación controlada.",
                    "Ajustar rol/grupos y políticas.",
                ],
            ),
            (
                "Seguridad",
                [
                    "Aislar equipo y escanear con EDR/AV.",
                    "Cambiar credenciales y revisar indicadores.",
                ],
            ),
            (
                UNCLASSIFIED_CATEGORY,
                [
                    "Solicitar más detalle del síntoma.",
                    "Registrar nuevo síntoma para mejorar el sistema.",
                ],
            ),
            (
                OTHER_CAUSE_CATEGORY,
                [
                    "Derivar a soporte remoto para triage.",
                    "Solicitar captura/logs para análisis.",
                ],
            ),
        ]);

        Self {
            single_by_rule,
            single_by_category,
            pair_by_rule,
            pair_by_category,
        }
    }

    /// Single suggested solution, rule-specific first, category fallback second.
    #[allow(dead_code)] // Single-line variant kept for non-web consumers
    pub fn suggest_solution(&self, category: &str, rule_id: Option<&str>) -> &str {
        if let Some(solution) = rule_id.and_then(|id| self.single_by_rule.get(id)) {
            return solution;
        }
        self.single_by_category
            .get(category)
            .map(String::as_str)
            .unwrap_or(NO_SOLUTION_FALLBACK)
    }

    /// Up to two suggestions to present to the user, same precedence.
    pub fn suggest_solutions(&self, category: &str, rule_id: Option<&str>) -> Vec<String> {
        let entries = rule_id
            .and_then(|id| self.pair_by_rule.get(id))
            .or_else(|| self.pair_by_category.get(category));

        match entries {
            Some(entries) => entries.iter().take(SUGGESTION_LIMIT).cloned().collect(),
            None => NO_SUGGESTIONS_FALLBACK
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

fn owned_map<const N: usize>(entries: [(&str, &str); N]) -> HashMap<String, String> {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn owned_pair_map<const N: usize>(entries: [(&str, [&str; 2]); N]) -> HashMap<String, Vec<String>> {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_id_wins_over_category() {
        let catalog = SolutionCatalog::standard();
        // Even with a mismatched category, the rule-specific pair wins.
        let pair = catalog.suggest_solutions("Red", Some("R-HW-01"));
        assert_eq!(pair[0], "Revisar/medir PSU y conexiones internas.");

        let single = catalog.suggest_solution("Red", Some("R-HW-01"));
        assert!(single.starts_with("Probar con otra toma/cable"));
    }

    #[test]
    fn test_category_fallback_when_rule_unknown() {
        let catalog = SolutionCatalog::standard();
        let pair = catalog.suggest_solutions("Red", Some("R-NOPE-99"));
        assert_eq!(pair[0], "Renovar IP/DNS y revisar credenciales.");

        let pair = catalog.suggest_solutions("Red", None);
        assert_eq!(pair.len(), 2);
    }

    #[test]
    fn test_single_fallback_for_rules_without_specific_text() {
        let catalog = SolutionCatalog::standard();
        // R-SEC-MAL-01 has no single-line entry of its own.
        let single = catalog.suggest_solution("Seguridad", Some("R-SEC-MAL-01"));
        assert!(single.starts_with("Realizar análisis completo"));
    }

    #[test]
    fn test_unknown_category_fixed_fallbacks() {
        let catalog = SolutionCatalog::standard();
        assert_eq!(
            catalog.suggest_solution("Telefonía", None),
            "No hay una solución sugerida disponible."
        );
        assert_eq!(
            catalog.suggest_solutions("Telefonía", None),
            ["No hay sugerencias", "—"]
        );
    }

    #[test]
    fn test_other_cause_category_is_covered() {
        let catalog = SolutionCatalog::standard();
        let pair = catalog.suggest_solutions(OTHER_CAUSE_CATEGORY, None);
        assert_eq!(pair[0], "Derivar a soporte remoto para triage.");
        assert_eq!(
            catalog.suggest_solution(OTHER_CAUSE_CATEGORY, None),
            "Derivar a soporte remoto para triage y diagnóstico guiado."
        );
    }

    #[test]
    fn test_every_table_rule_has_a_pair() {
        let catalog = SolutionCatalog::standard();
        let rules = crate::knowledge::classification_rules().unwrap();
        for rule in rules.iter() {
            let pair = catalog.suggest_solutions(&rule.category, Some(&rule.id));
            assert_eq!(pair.len(), 2, "rule {} missing paired suggestions", rule.id);
        }
    }
}
