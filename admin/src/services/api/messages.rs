//! # User-Facing Message Table
//!
//! Static code → message tables per locale. Unknown codes resolve to the
//! locale's `default` entry.

use lib_core::Locale;

/// Code used when nothing more specific applies.
pub const DEFAULT_CODE: &str = "default";

static EN: &[(&str, &str)] = &[
    ("network-error", "Unable to reach the server. Check your connection and try again."),
    ("not-found", "The requested resource was not found."),
    ("server-error", "The server encountered an error. Please try again later."),
    ("unexpected-api-error", "Something went wrong while talking to the server."),
    ("auth/invalid-custom-token", "The sign-in token is invalid. Please start again."),
    ("auth/custom-token-mismatch", "The sign-in token belongs to a different project."),
    ("auth/network-request-failed", "Could not reach the sign-in service."),
    ("auth/user-disabled", "This account has been disabled."),
    ("auth/too-many-requests", "Too many attempts. Please wait a moment and try again."),
    ("auth/email-already-in-use", "An account with this email already exists."),
    ("auth/invalid-api-key", "The sign-in service is not configured."),
    ("auth/internal-error", "The sign-in service reported an error. Please try again."),
    (DEFAULT_CODE, "An unexpected error occurred."),
];

static ES: &[(&str, &str)] = &[
    ("network-error", "No se puede conectar con el servidor. Revisa tu conexión e inténtalo de nuevo."),
    ("not-found", "No se encontró el recurso solicitado."),
    ("server-error", "El servidor encontró un error. Inténtalo más tarde."),
    ("unexpected-api-error", "Algo salió mal al comunicarse con el servidor."),
    ("auth/invalid-custom-token", "El token de acceso no es válido. Vuelve a empezar."),
    ("auth/custom-token-mismatch", "El token de acceso pertenece a otro proyecto."),
    ("auth/network-request-failed", "No se pudo conectar con el servicio de acceso."),
    ("auth/user-disabled", "Esta cuenta ha sido deshabilitada."),
    ("auth/too-many-requests", "Demasiados intentos. Espera un momento e inténtalo de nuevo."),
    ("auth/email-already-in-use", "Ya existe una cuenta con este correo."),
    ("auth/invalid-api-key", "El servicio de acceso no está configurado."),
    ("auth/internal-error", "El servicio de acceso reportó un error. Inténtalo de nuevo."),
    (DEFAULT_CODE, "Ocurrió un error inesperado."),
];

fn table(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => EN,
        Locale::Es => ES,
    }
}

/// Resolve `code` to a message, falling back to the locale default.
pub fn lookup(locale: Locale, code: &str) -> &'static str {
    let table = table(locale);
    table
        .iter()
        .find(|(key, _)| *key == code)
        .or_else(|| table.iter().find(|(key, _)| *key == DEFAULT_CODE))
        .map(|(_, message)| *message)
        .unwrap_or("An unexpected error occurred.")
}
