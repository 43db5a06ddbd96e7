//! User-facing message catalog (pt-BR, the product locale).

// Auth
pub const CONNECTION_ERROR: &str = "Erro de conexão com o servidor";
pub const SESSION_EXPIRED: &str = "Sessão expirada. Faça login novamente.";
pub const SESSION_EXPIRED_REDIRECTING: &str = "Sessão expirada. Redirecionando...";
pub const LOGIN_REQUIRED_TO_CREATE: &str = "Você precisa estar logado para criar mangás.";
pub const LOGIN_REQUIRED_FOR_FAVORITES: &str = "Faça login para adicionar aos favoritos!";
pub const ALREADY_LOGGED_IN: &str = "Você já está logado! Redirecionando...";
pub const LOGIN_FAILED: &str = "Erro no login. Verifique suas credenciais.";
pub const REGISTER_FAILED: &str = "Erro no cadastro. Tente novamente.";
pub const LOGOUT_DONE: &str = "Logout realizado com sucesso!";

// Forms
pub const FILL_ALL_FIELDS: &str = "Por favor, preencha todos os campos.";
pub const INVALID_EMAIL: &str = "Por favor, insira um e-mail válido.";
pub const PASSWORD_TOO_SHORT: &str = "A senha deve ter pelo menos 6 caracteres.";
pub const PASSWORDS_DIFFER: &str = "As senhas não coincidem.";
pub const USERNAME_TOO_SHORT: &str = "O nome de usuário deve ter pelo menos 3 caracteres.";
pub const TITLE_REQUIRED: &str = "Título é obrigatório";
pub const DESCRIPTION_REQUIRED: &str = "Descrição é obrigatória";
pub const COVER_REQUIRED: &str = "Capa é obrigatória";
pub const CHAPTER_REQUIRED: &str = "Pelo menos um capítulo é obrigatório";
pub const IMAGES_ONLY: &str = "Selecione apenas imagens.";

// Admin
pub const MANGA_CREATED: &str = "Mangá criado com sucesso!";
pub const MANGA_UPDATED: &str = "Mangá atualizado com sucesso!";
pub const MANGA_DELETED: &str = "Mangá excluído com sucesso!";
pub const MANGA_SAVE_FAILED: &str = "Erro ao salvar mangá";
pub const MANGA_DELETE_FAILED: &str = "Erro ao excluir mangá";
pub const ROLE_UPDATED: &str = "Role alterada com sucesso!";
pub const ROLE_UPDATE_FAILED: &str = "Erro ao alterar role do usuário";
pub const USER_DELETED: &str = "Usuário deletado com sucesso!";
pub const USER_DELETE_FAILED: &str = "Erro ao deletar usuário";
pub const USERS_LOAD_FAILED: &str = "Erro ao carregar usuários";
pub const CANNOT_MODIFY_SELF: &str = "Você não pode modificar a própria conta.";

// Catalog and reader
pub const MANGAS_LOAD_FAILED: &str = "Erro ao carregar mangás";
pub const MANGA_NOT_FOUND: &str = "Mangá não encontrado";
pub const MANGA_LOAD_FAILED: &str = "Erro ao carregar mangá";
pub const CHAPTERS_LOAD_FAILED: &str = "Erro ao carregar capítulos";
pub const CHAPTER_NOT_FOUND: &str = "Capítulo não encontrado";
pub const PAGES_LOAD_FAILED: &str = "Erro ao carregar páginas";
pub const FAVORITE_ADDED: &str = "Mangá adicionado aos favoritos!";
pub const FAVORITE_FAILED: &str = "Erro ao adicionar aos favoritos";
pub const LATEST_ONLY: &str = "Mostrando apenas os últimos lançamentos!";

/// `Bem-vindo, {name}!`
#[must_use]
pub fn welcome(name: &str) -> String {
    format!("Bem-vindo, {name}!")
}

/// `Conta criada com sucesso! Bem-vindo, {name}!`
#[must_use]
pub fn account_created(name: &str) -> String {
    format!("Conta criada com sucesso! Bem-vindo, {name}!")
}
