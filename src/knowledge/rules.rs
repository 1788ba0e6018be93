//! The authored ticket classification rule table
//!
//! Order matters: the engines evaluate top to bottom and the first match
//! wins, so the more specific hardware rules sit above the generic ones.
//! All user-facing text is the support team's authored Spanish content.

use crate::engine::{Predicate, Rule, RuleSet, RuleSetError};

/// Build the standard classification table.
pub fn classification_rules() -> Result<RuleSet, RuleSetError> {
    RuleSet::new(vec![
        // Hardware
        Rule::new(
            "R-HW-PSU-01",
            "Fuente de poder falla",
            "Si hay síntomas de falla de PSU (apagones, no arranca, clicks), clasificar como Hardware.",
            Predicate::flag("psu_falla"),
            "Hardware",
        )
        .with_solution("Probar con PSU conocida o tester, revisar cables del panel frontal y cortos.")
        .with_solutions([
            "Probar con otra PSU o medir voltajes con tester.",
            "Revisar conectores ATX/EPS/PCIe y panel frontal.",
            "Descartar corto desconectando periféricos.",
        ])
        .with_future_suggestions([
            "Si falla bajo carga, reemplazar PSU por modelo certificado.",
            "Registrar lote/modelo por trazabilidad.",
        ]),
        Rule::new(
            "R-HW-THERM-01",
            "Sobrecalentamiento",
            "Si hay temperaturas elevadas o thermal throttling, clasificar como Hardware.",
            Predicate::flag("sobrecalentamiento"),
            "Hardware",
        )
        .with_solution("Limpiar ventiladores/disipadores, renovar pasta térmica y mejorar flujo de aire.")
        .with_solutions([
            "Limpiar polvo y renovar pasta térmica.",
            "Revisar flujo/curvas de ventilación y filtros.",
            "Verificar montaje del disipador y espacios del gabinete.",
        ])
        .with_future_suggestions([
            "Evaluar ventiladores adicionales o mejor disipador.",
            "Monitorear temperaturas con herramienta dedicada.",
        ]),
        Rule::new(
            "R-HW-RAM-01",
            "Memoria RAM defectuosa",
            "Si hay síntomas de RAM defectuosa (pitidos al arrancar, pantallazos aleatorios, pruebas fallidas), clasificar como Hardware.",
            Predicate::flag("ram_falla"),
            "Hardware",
        )
        .with_solution("Probar módulos de RAM individualmente y con MemTest; limpiar contactos y revisar compatibilidad.")
        .with_solutions([
            "Ejecutar MemTest/Windows Memory Diagnostic.",
            "Probar módulos de RAM de a uno y en distintos slots.",
            "Limpiar contactos y revisar que estén bien asentados.",
        ])
        .with_future_suggestions([
            "Escalar a laboratorio si las pruebas son inconclusas.",
            "Registrar lote/modelo para análisis de fallas.",
        ]),
        Rule::new(
            "R-HW-DISK-01",
            "Disco/almacenamiento con errores",
            "Si hay sectores reasignados, ruidos extraños o errores de lectura/escritura, clasificar como Hardware.",
            Predicate::flag("disco_falla"),
            "Hardware",
        )
        .with_solution("Respaldar datos, verificar SMART, ejecutar diagnóstico del fabricante y considerar reemplazo.")
        .with_solutions([
            "Respaldar información crítica inmediatamente.",
            "Revisar SMART (CrystalDiskInfo, smartctl).",
            "Ejecutar diagnóstico oficial del fabricante.",
            "Cambiar cable SATA/puerto si aplica.",
            "Reemplazar unidad si persisten errores.",
        ])
        .with_future_suggestions([
            "Programar migración a SSD si es disco mecánico antiguo.",
            "Registrar el incidente para mantenimiento preventivo.",
        ]),
        Rule::new(
            "R-HW-MON-01",
            "Monitor sin señal",
            "Si el monitor no enciende o no recibe señal, clasificar como Hardware.",
            Predicate::flag("monitor_sin_senal"),
            "Hardware",
        )
        .with_solution("Verificar alimentación, cable y entrada de video seleccionada; probar con otro cable/monitor.")
        .with_solutions([
            "Comprobar que el monitor esté encendido y con brillo adecuado.",
            "Verificar cable y puerto (HDMI/DP/VGA) y entrada seleccionada.",
            "Probar con otro cable/monitor o equipo.",
        ])
        .with_future_suggestions([
            "Evaluar reemplazo si el panel no enciende.",
            "Documentar el modelo/serie y síntoma.",
        ]),
        Rule::new(
            "R-HW-01",
            "PC no enciende",
            "Si la PC no enciende, clasificar como Hardware (posible fallo físico).",
            Predicate::flag("pc_no_enciende"),
            "Hardware",
        )
        .with_solution("Revisar fuente de alimentación, conexiones y realizar diagnóstico de hardware.")
        .with_solutions([
            "Verificar cable de alimentación y regleta.",
            "Probar con otra toma de corriente o cable.",
            "Comprobar interruptor de la fuente de poder (PSU).",
            "Retirar y volver a asentar RAM/CPU/cables del panel frontal.",
            "Probar con fuente de poder conocida o tester.",
        ])
        .with_future_suggestions([
            "Derivar a soporte avanzado/garantía si no enciende tras pruebas.",
            "Registrar el incidente para análisis de patrones de fallas.",
        ]),
        Rule::new(
            "R-HW-02",
            "Periférico roto",
            "Si un periférico crítico está roto (ratón/teclado), clasificar como Hardware.",
            Predicate::flag("periferico_roto"),
            "Hardware",
        )
        .with_solution("Sustituir o reparar el periférico. Probar con otro puerto/maquina.")
        .with_solutions([
            "Probar el periférico en otro puerto USB/equipo.",
            "Actualizar/reinstalar drivers del fabricante.",
            "Verificar cableado o receptor inalámbrico.",
            "Reemplazar el periférico si persiste la falla.",
        ])
        .with_future_suggestions([
            "Escalar a inventario para reposición.",
            "Registrar el incidente para control de stock.",
        ]),
        Rule::new(
            "R-HW-VID-01",
            "Tarjeta de video falla",
            "Si hay indicios de fallo de GPU (sin video, artefactos, cuelgues al iniciar gráficos), clasificar como Hardware.",
            Predicate::flag("tarjeta_video_falla"),
            "Hardware",
        )
        .with_solution("Actualizar/reinstalar drivers de video (DDU en modo seguro), verificar cables/puertos y alimentación PCIe, revisar temperaturas/ventiladores y probar la tarjeta en otro equipo. Si persisten artefactos o pantallazos, considerar reemplazo.")
        .with_solutions([
            "Reinstalar drivers con DDU en modo seguro y luego instalar el último driver estable.",
            "Verificar alimentación PCIe/cables y que el GPU esté bien asentado.",
            "Revisar temperaturas con herramientas (HWInfo/MSI Afterburner).",
            "Probar en otro puerto/monitor/cable.",
            "Probar la tarjeta en otro equipo para descartar la placa.",
        ])
        .with_future_suggestions([
            "Si persisten artefactos/pantallazos, evaluar reemplazo de GPU.",
            "Escalar a laboratorio para diagnóstico de hardware de video.",
        ]),
        // Red
        Rule::new(
            "R-RED-01",
            "Problema de conexión WiFi / Internet",
            "Si no puede conectar al WiFi o no tiene acceso a Internet, clasificar como Red.",
            Predicate::any_of([
                Predicate::flag("no_puede_conectar_wifi"),
                Predicate::flag("sin_acceso_internet"),
            ]),
            "Red",
        )
        .with_solution("Verificar SSID, credenciales, DHCP, y estado del router/switch.")
        .with_solutions([
            "Comprobar que el SSID y la contraseña sean correctos.",
            "Olvidar y volver a conectarse a la red.",
            "Renovar IP (DHCP) y limpiar DNS.",
            "Reiniciar router/switch y verificar luz de enlace.",
            "Probar conectividad por cable para aislar WiFi.",
        ])
        .with_future_suggestions([
            "Escalar a NOC si hay caída general.",
            "Registrar el incidente con hora y ubicación para correlación.",
        ]),
        // Software
        Rule::new(
            "R-SW-UPD-01",
            "Actualizaciones fallidas",
            "Si las actualizaciones de sistema/app fallan, clasificar como Software.",
            Predicate::flag("actualizaciones_fallidas"),
            "Software",
        )
        .with_solution("Limpiar cachés/servicios de actualización y aplicar parche manual si es necesario.")
        .with_solutions([
            "Reiniciar servicios y limpiar caché de actualizaciones.",
            "Aplicar el instalador/patch manual oficial.",
        ])
        .with_future_suggestions([
            "Revisar espacio, políticas y conectividad a repositorios.",
            "Programar ventana de mantenimiento para reintentos.",
        ]),
        Rule::new(
            "R-SW-COMP-01",
            "Incompatibilidad de software",
            "Si el software no es compatible con el SO/arquitectura, clasificar como Software.",
            Predicate::flag("incompatibilidad_software"),
            "Software",
        )
        .with_solution("Usar versión compatible, modo compatibilidad o dependencias requeridas.")
        .with_solutions([
            "Ejecutar en modo compatibilidad o versión soportada.",
            "Instalar dependencias/SDK necesarios.",
        ])
        .with_future_suggestions([
            "Consultar soporte del proveedor y matriz de compatibilidad.",
            "Valorar alternativa certificada por TI.",
        ]),
        Rule::new(
            "R-SW-CORP-01",
            "Aplicación corporativa falla/BD corrupta",
            "Si falla una aplicación corporativa o su BD presenta corrupción, clasificar como Software.",
            Predicate::flag("software_corporativo_falla"),
            "Software",
        )
        .with_solution("Revisar logs de la app/servidor, restaurar backup y coordinar con el equipo de la aplicación.")
        .with_solutions([
            "Revisar logs y visor de eventos de la aplicación/BD.",
            "Validar versiones/compatibilidad y dependencias.",
            "Ejecutar scripts de reparación/consistencia si existen.",
            "Restaurar respaldo validado (previo análisis).",
            "Coordinar con equipo de la app para plan de recuperación.",
        ])
        .with_future_suggestions([
            "Implementar validaciones y backups verificados.",
            "Agregar monitoreo de salud y alertas.",
        ]),
        Rule::new(
            "R-SW-01",
            "Programa se cierra / Lentitud",
            "Si un programa se cierra inesperadamente o el sistema está muy lento, clasificar como Software.",
            Predicate::any_of([
                Predicate::flag("programa_se_cierra"),
                Predicate::flag("lentitud_sistema"),
            ]),
            "Software",
        )
        .with_solution("Revisar logs de la aplicación, actualizar/reinstalar el software o verificar recursos del sistema.")
        .with_solutions([
            "Revisar Visor de eventos/logs de la aplicación.",
            "Actualizar la aplicación y el sistema operativo.",
            "Ejecutar en inicio limpio/modo seguro para descartar conflictos.",
        ])
        .with_future_suggestions([
            "Escalar al equipo de la aplicación con los logs adjuntos.",
            "Documentar el escenario y versión para reproducibilidad.",
        ]),
        // Permisos
        Rule::new(
            "R-PM-01",
            "Problema de permisos / instalación",
            "Si hay acceso denegado o no puede instalar software, clasificar como Permisos.",
            Predicate::any_of([
                Predicate::flag("acceso_denegado"),
                Predicate::flag("no_puede_instalar"),
            ]),
            "Permisos",
        )
        .with_solution("Revisar permisos del usuario y las políticas de control de aplicaciones.")
        .with_solutions([
            "Validar rol/pertenencia a grupos y ACLs.",
            "Solicitar elevación temporal si procede.",
            "Revisar GPO/AppLocker/Software Restriction Policies.",
            "Intentar instalación desde cuenta administrativa controlada.",
        ])
        .with_future_suggestions([
            "Abrir ticket con seguridad/infra para permisos permanentes.",
            "Auditar intentos fallidos para mejorar políticas.",
        ]),
        // Seguridad
        Rule::new(
            "R-SEC-01",
            "Email sospechoso",
            "Si se detecta un email sospechoso (posible phishing), clasificar como Seguridad.",
            Predicate::flag("email_sospechoso"),
            "Seguridad",
        )
        .with_solution("Aislar el equipo, ejecutar análisis de seguridad y seguir protocolo de incidentes.")
        .with_solutions([
            "No abrir enlaces ni adjuntos; reportar inmediatamente.",
            "Aislar el equipo de la red si hubo interacción.",
            "Ejecutar escaneo con AV/EDR y cambiar credenciales.",
            "Seguir el playbook de respuesta a incidentes.",
        ])
        .with_future_suggestions([
            "Capacitación anti-phishing al usuario/área.",
            "Revisión de reglas de correo y listas de bloqueo.",
        ]),
        Rule::new(
            "R-SEC-MAL-01",
            "Malware detectado",
            "Si hay infección o señales de malware, clasificar como Seguridad.",
            Predicate::flag("malware_detectado"),
            "Seguridad",
        )
        .with_solution("Aislar equipo, escanear con EDR/AV y restaurar desde respaldo si es necesario.")
        .with_solutions([
            "Aislar equipo y ejecutar escaneo completo.",
            "Eliminar/quarantena; restaurar desde backup verificado.",
        ])
        .with_future_suggestions([
            "Cambiar credenciales y revisar persistencia.",
            "Actualizar políticas y parches de seguridad.",
        ]),
    ])
}
