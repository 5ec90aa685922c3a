//! Static marketing and info pages.
//!
//! The only unauthenticated content route. Pages are fixed strings,
//! not a CMS.

use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

struct Page {
    slug: &'static str,
    title: &'static str,
    body: &'static str,
}

static PAGES: &[Page] = &[
    Page {
        slug: "about",
        title: "About Us",
        body: "We build accessible wellness tools that meet people where they are. \
               Our coaching blends mood tracking, adaptive exercise, and nutrition \
               guidance into one gentle daily practice.",
    },
    Page {
        slug: "mission",
        title: "Our Mission",
        body: "Wellness should be within reach for every body. We design for people \
               with physical limitations, chronic conditions, and mental health \
               challenges first, not as an afterthought.",
    },
    Page {
        slug: "careers",
        title: "Careers",
        body: "We're a small team that cares about inclusive health technology. \
               Open roles are posted here as they become available.",
    },
    Page {
        slug: "press",
        title: "Press",
        body: "For media inquiries and brand assets, reach out through the contact \
               page and we'll get back to you within two business days.",
    },
    Page {
        slug: "help",
        title: "Help Center",
        body: "Common questions about onboarding, mood tracking, workout sessions, \
               and your data. Can't find an answer? Contact us directly.",
    },
    Page {
        slug: "contact",
        title: "Contact",
        body: "Questions, feedback, or accessibility requests: we read everything. \
               Expect a reply within two business days.",
    },
    Page {
        slug: "privacy",
        title: "Privacy Policy",
        body: "Your wellness records belong to you. We store only what the service \
               needs to function, never sell personal data, and delete your records \
               on request.",
    },
    Page {
        slug: "terms",
        title: "Terms of Service",
        body: "This service offers general wellness guidance and is not a substitute \
               for professional medical or mental health care. Always consult a \
               healthcare professional for diagnosis and treatment.",
    },
];

/// GET /api/pages/{slug}
pub async fn page(Path(slug): Path<String>) -> impl IntoResponse {
    match PAGES.iter().find(|p| p.slug == slug) {
        Some(page) => Json(json!({
            "slug": page.slug,
            "title": page.title,
            "body": page.body,
        }))
        .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "No such page"})),
        )
            .into_response(),
    }
}
