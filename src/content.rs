//! Copy shipped with the page. The CTA and footer can be overridden from the
//! CMS (see `settings`).

pub const AUDIT_CTA_LABEL: &str = "Audit gratuit";
pub const AUDIT_CTA_LINK: &str = "#audit";
pub const FOOTER_TEXT: &str = "© MXL Digital · Automatisation & sites sur mesure";

pub struct Service {
    pub title: &'static str,
    pub summary: &'static str,
}

pub const SERVICES: &[Service] = &[
    Service {
        title: "Automatisation des process",
        summary: "Relances, devis, facturation : vos tâches répétitives tournent toutes seules grâce à des workflows n8n sur mesure.",
    },
    Service {
        title: "Sites vitrines performants",
        summary: "Des sites rapides et pensés pour convertir, connectés à votre CRM dès le premier formulaire.",
    },
    Service {
        title: "Agents IA métier",
        summary: "Qualification de leads, tri des emails, réponses aux questions fréquentes : l'IA prend en charge le premier niveau.",
    },
];

pub struct Project {
    pub title: &'static str,
    pub url: &'static str,
    pub summary: &'static str,
    pub tags: &'static [&'static str],
}

pub const PROJECTS: &[Project] = &[
    Project {
        title: "Cabinet d'architecture",
        url: "https://mxl.digital/demos/architecture/",
        summary: "Portfolio éditorial avec prise de rendez-vous synchronisée à l'agenda.",
        tags: &["Site vitrine", "Agenda"],
    },
    Project {
        title: "Artisan rénovation",
        url: "https://mxl.digital/demos/renovation/",
        summary: "Simulateur de devis relié à un workflow de relance automatique.",
        tags: &["Devis", "n8n"],
    },
    Project {
        title: "Studio de yoga",
        url: "https://mxl.digital/demos/yoga/",
        summary: "Planning des cours, réservation et rappels SMS sans intervention manuelle.",
        tags: &["Réservation", "SMS"],
    },
];
