//! Static productivity tips and resource links.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tip {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

const TIPS: &[Tip] = &[
    Tip {
        id: "1",
        title: "Técnica Pomodoro",
        description: "Trabaja enfocado por 25 minutos y luego toma un descanso de 5 minutos. Después de 4 ciclos, toma un descanso más largo de 15-30 minutos.",
    },
    Tip {
        id: "2",
        title: "Divide y Vence",
        description: "Divide tareas grandes en subtareas más pequeñas y manejables. Esto reduce la sensación de abrumamiento y te ayuda a avanzar gradualmente.",
    },
    Tip {
        id: "3",
        title: "Minimiza Distracciones",
        description: "Apaga notificaciones, usa modo de concentración y crea un espacio de trabajo libre de interrupciones.",
    },
];

const RESOURCES: &[&str] = &[
    "Guía de Productividad",
    "Curso de Gestión de Tiempo",
    "Técnicas de Concentración",
];

pub fn tips() -> &'static [Tip] {
    TIPS
}

pub fn tip(id: &str) -> Option<&'static Tip> {
    TIPS.iter().find(|tip| tip.id == id)
}

/// Titles of the curated resource links.
pub fn resources() -> &'static [&'static str] {
    RESOURCES
}
