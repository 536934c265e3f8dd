use thiserror::Error;

/// Every failure the session manager, API layer and gallery can report.
///
/// Messages are user-facing and shown verbatim by the front end.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("L'email et/ou le mot de passe fourni est invalide.")]
    InvalidCredentials,

    #[error("Une erreur est survenue lors de la récupération des données.")]
    FetchFailed,

    #[error("Une erreur est survenue. Aucun jeton d'authentification/autorisation n'a été fourni.")]
    MissingToken,

    #[error("Une erreur est survenue lors de la suppression d'un élément: {0}")]
    DeleteFailed(#[source] reqwest::Error),

    #[error("Vous devez être connecté pour effectuer cette action.")]
    NotAuthenticated,

    #[error("Le projet n'a pas pu être ajouté.")]
    NotCreated,

    #[error("Le fichier est trop volumineux ({} octets). Veuillez sélectionner un fichier de taille inférieure à {} Mo.", .size, .max / (1024 * 1024))]
    ImageTooLarge { size: u64, max: u64 },

    #[error("Catégorie inconnue : {0}")]
    UnknownCategory(i64),

    #[error("Jeton refusé par le serveur, veuillez vous reconnecter.")]
    Unauthorized,

    #[error("Accès refusé : {0}")]
    AccessDenied(String),

    #[error("Ressource introuvable : {0}")]
    NotFound(String),

    #[error("Erreur serveur : {0}")]
    ServerError(String),

    #[error("Réponse invalide : {0}")]
    InvalidResponse(String),

    #[error("Erreur réseau : {0}")]
    Network(#[from] reqwest::Error),

    #[error("Erreur de stockage du jeton : {0}")]
    Storage(#[from] anyhow::Error),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::AccessDenied(truncated),
            404 => ApiError::NotFound(truncated),
            500..=599 => ApiError::ServerError(truncated),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }
}
