//! Contexto de la petición autenticada

use uuid::Uuid;

/// Contexto explícito que el middleware construye por petición y que viaja
/// hasta los controladores y el flujo de escritura
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub user_id: Uuid,
    pub email: String,
    pub request_id: Uuid,
}

impl RequestContext {
    pub fn new(user_id: Uuid, email: String) -> Self {
        Self {
            user_id,
            email,
            request_id: Uuid::new_v4(),
        }
    }
}
