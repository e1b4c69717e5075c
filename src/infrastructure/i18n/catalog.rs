//! Static translation resources

pub(super) const EN: &[(&str, &str)] = &[
    ("common.cancel", "Cancel"),
    ("common.loading", "Loading..."),
    ("settings.apiKeys.title", "API Keys"),
    ("settings.apiKeys.description", "Manage your API keys for accessing the API"),
    ("settings.apiKeys.generate", "Generate New Key"),
    ("settings.apiKeys.keyDescription", "Key Description"),
    ("settings.apiKeys.descriptionPlaceholder", "Enter a description for this key"),
    ("settings.apiKeys.key", "Key"),
    ("settings.apiKeys.created", "Created"),
    ("settings.apiKeys.status", "Status"),
    ("settings.apiKeys.actions", "Actions"),
    ("settings.apiKeys.noKeys", "No API keys found"),
    ("settings.apiKeys.active", "Active"),
    ("settings.apiKeys.revoked", "Revoked"),
    ("settings.apiKeys.revoke", "Revoke"),
    ("settings.apiKeys.delete", "Delete"),
    ("settings.apiKeys.copy", "Copy to clipboard"),
    ("settings.apiKeys.copied", "Copied!"),
    (
        "settings.apiKeys.saveKeyWarning",
        "Make sure to copy this key now. You won't be able to see it again!",
    ),
    ("settings.apiKeys.confirmRevoke", "Are you sure you want to revoke this API key?"),
    ("settings.apiKeys.confirmDelete", "Are you sure you want to delete this API key?"),
    ("settings.apiKeys.errors.loadError", "Error loading API keys"),
    ("settings.apiKeys.errors.generateError", "Error generating API key"),
    (
        "settings.apiKeys.errors.duplicateDescription",
        "An API key with this description already exists",
    ),
    ("settings.apiKeys.errors.authError", "Authentication error"),
    ("settings.apiKeys.errors.notAuthenticated", "User not authenticated"),
    (
        "settings.apiKeys.errors.validationError",
        "Validation error: missing required fields",
    ),
    ("settings.apiKeys.errors.revokeError", "Error revoking API key"),
    ("settings.apiKeys.errors.deleteError", "Error deleting API key"),
    ("settings.apiKeys.errors.copyError", "Error copying to clipboard"),
    (
        "settings.apiKeys.errors.busy",
        "Another API key change is still in progress",
    ),
];

pub(super) const ES: &[(&str, &str)] = &[
    ("common.cancel", "Cancelar"),
    ("common.loading", "Cargando..."),
    ("settings.apiKeys.title", "Claves API"),
    ("settings.apiKeys.description", "Gestiona tus claves API para acceder a la API"),
    ("settings.apiKeys.generate", "Generar Nueva Clave"),
    ("settings.apiKeys.keyDescription", "Descripción de la Clave"),
    (
        "settings.apiKeys.descriptionPlaceholder",
        "Ingresa una descripción para esta clave",
    ),
    ("settings.apiKeys.key", "Clave"),
    ("settings.apiKeys.created", "Creada"),
    ("settings.apiKeys.status", "Estado"),
    ("settings.apiKeys.actions", "Acciones"),
    ("settings.apiKeys.noKeys", "No se encontraron claves API"),
    ("settings.apiKeys.active", "Activa"),
    ("settings.apiKeys.revoked", "Revocada"),
    ("settings.apiKeys.revoke", "Revocar"),
    ("settings.apiKeys.delete", "Eliminar"),
    ("settings.apiKeys.copy", "Copiar al portapapeles"),
    ("settings.apiKeys.copied", "¡Copiado!"),
    (
        "settings.apiKeys.saveKeyWarning",
        "¡Asegúrate de copiar esta clave ahora. No podrás verla de nuevo!",
    ),
    (
        "settings.apiKeys.confirmRevoke",
        "¿Estás seguro de que deseas revocar esta clave API?",
    ),
    (
        "settings.apiKeys.confirmDelete",
        "¿Estás seguro de que deseas eliminar esta clave API?",
    ),
    ("settings.apiKeys.errors.loadError", "Error al cargar las claves API"),
    ("settings.apiKeys.errors.generateError", "Error al generar la clave API"),
    (
        "settings.apiKeys.errors.duplicateDescription",
        "Ya existe una clave API con esta descripción",
    ),
    ("settings.apiKeys.errors.authError", "Error de autenticación"),
    ("settings.apiKeys.errors.notAuthenticated", "Usuario no autenticado"),
    (
        "settings.apiKeys.errors.validationError",
        "Error de validación: campos requeridos faltantes",
    ),
    ("settings.apiKeys.errors.revokeError", "Error al revocar la clave API"),
    ("settings.apiKeys.errors.deleteError", "Error al eliminar la clave API"),
    ("settings.apiKeys.errors.copyError", "Error al copiar al portapapeles"),
    (
        "settings.apiKeys.errors.busy",
        "Otro cambio de claves API sigue en curso",
    ),
];
