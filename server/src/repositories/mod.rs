//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Questo modulo organizza i repository in sotto-moduli separati per una migliore manutenibilità.
//! Ogni repository gestisce le operazioni di database per una specifica entità.

// ************************* NOTA SULLE QUERY ************************* //

/*
   Le query usano le funzioni runtime di sqlx (query / query_as), non le macro query!.
   Lo schema è coperto dai test #[sqlx::test], che applicano le migrations di `migrations/`
   su un database SQLite isolato per ogni test.
   Il mapping riga -> entity passa da #[derive(FromRow)] sulle entity.
   Ricorda:
   .execute(...)        INSERT/UPDATE/DELETE
   .fetch_optional(...) zero o una riga
   .fetch_one(...)      esattamente una riga (RowNotFound altrimenti)
   .fetch_all(...)      Vec di righe
   e sempre await? in modo che l'errore venga propagato al service che lo converte in AppError.
*/

// ************************* MODULI REPOSITORY ************************* //

pub mod message;
pub mod traits;
pub mod user;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{Create, Read};

// Re-esportazione delle struct dei repository per facilitare l'import
pub use message::MessageRepository;
pub use user::UserRepository;
