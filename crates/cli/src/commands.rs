//! CLI commands

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use recipebox_domain::{
    ImageUpload, LoginRequest, ProfileUpdate, RecipeDraft, RegisterRequest,
};
use recipebox_infra::ClientContext;
use serde_json::json;
use tracing::info;

use crate::output::{self, PageView, SessionView};

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "RECIPEBOX_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long, env = "RECIPEBOX_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session token
    Logout,

    /// Browse and manage recipes
    Recipes {
        #[command(subcommand)]
        command: RecipeCommands,
    },

    /// Manage favorite recipes
    Favorites {
        #[command(subcommand)]
        command: FavoriteCommands,
    },

    /// Show or edit the signed-in user's profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
}

#[derive(Subcommand)]
pub enum RecipeCommands {
    /// List all recipes, optionally filtered by name
    List {
        /// Case-insensitive name filter
        #[arg(short, long)]
        search: Option<String>,

        /// 1-based page of the filtered listing
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// List recipes created by the signed-in user
    Mine,

    /// Show one recipe
    Show { id: String },

    /// Create a recipe
    Add(DraftArgs),

    /// Replace an existing recipe
    Edit {
        id: String,

        #[command(flatten)]
        draft: DraftArgs,
    },

    /// Delete a recipe
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum FavoriteCommands {
    /// List favorite recipes
    List,

    /// Mark a recipe as favorite
    Add { id: String },

    /// Remove a recipe from favorites
    Remove { id: String },
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the profile
    Show,

    /// Change name and/or email
    Update {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },
}

/// Fields of the recipe form
#[derive(Args)]
pub struct DraftArgs {
    #[arg(long)]
    name: String,

    #[arg(long, default_value = "")]
    description: String,

    /// Repeat once per ingredient
    #[arg(short, long = "ingredient", required = true)]
    ingredients: Vec<String>,

    #[arg(long, default_value = "")]
    duration: String,

    #[arg(long, default_value = "")]
    instructions: String,

    /// Image files to upload; switches the request to multipart
    #[arg(long = "image")]
    images: Vec<PathBuf>,
}

impl DraftArgs {
    async fn into_draft(self) -> Result<RecipeDraft> {
        let mut images = Vec::with_capacity(self.images.len());
        for path in &self.images {
            images.push(load_image(path).await?);
        }

        Ok(RecipeDraft {
            name: self.name,
            description: self.description,
            ingredients: self.ingredients,
            duration: self.duration,
            instructions: self.instructions,
            images,
        })
    }
}

impl Commands {
    pub async fn execute(self, context: &ClientContext) -> Result<()> {
        match self {
            Self::Login { email, password } => {
                let response = context.auth.login(&LoginRequest { email, password }).await?;
                info!("Signed in");
                output::print(&SessionView::from(&response))
            }
            Self::Register { name, email, password } => {
                let response =
                    context.auth.register(&RegisterRequest { name, email, password }).await?;
                info!("Account created");
                output::print(&SessionView::from(&response))
            }
            Self::Logout => {
                context.auth.logout().await?;
                output::print(&json!({ "signed_in": false }))
            }
            Self::Recipes { command } => command.execute(context).await,
            Self::Favorites { command } => command.execute(context).await,
            Self::Profile { command } => command.execute(context).await,
        }
    }
}

impl RecipeCommands {
    async fn execute(self, context: &ClientContext) -> Result<()> {
        let recipes = &context.recipes;
        match self {
            Self::List { search, page } => {
                let query = search.unwrap_or_default();
                let page = recipes.search_recipes(&query, page).await?;
                output::print(&PageView::from(&page))
            }
            Self::Mine => output::print(&recipes.my_recipes().await?),
            Self::Show { id } => output::print(&recipes.get_recipe(&id).await?),
            Self::Add(draft) => {
                let created = recipes.create_recipe(draft.into_draft().await?).await?;
                info!(id = %created.id, "Recipe created");
                output::print(&created)
            }
            Self::Edit { id, draft } => {
                let updated = recipes.update_recipe(&id, draft.into_draft().await?).await?;
                output::print(&updated)
            }
            Self::Delete { id } => {
                recipes.delete_recipe(&id).await?;
                output::print(&json!({ "deleted": id }))
            }
        }
    }
}

impl FavoriteCommands {
    async fn execute(self, context: &ClientContext) -> Result<()> {
        let recipes = &context.recipes;
        match self {
            Self::List => output::print(&recipes.favorites().await?),
            Self::Add { id } => {
                recipes.add_favorite(&id).await?;
                output::print(&json!({ "favorite": id }))
            }
            Self::Remove { id } => {
                recipes.remove_favorite(&id).await?;
                output::print(&json!({ "unfavorited": id }))
            }
        }
    }
}

impl ProfileCommands {
    async fn execute(self, context: &ClientContext) -> Result<()> {
        match self {
            Self::Show => output::print(&context.profile.profile().await?),
            Self::Update { name, email } => {
                if name.is_none() && email.is_none() {
                    bail!("Nothing to update: pass --name and/or --email");
                }
                let updated = context.profile.update_profile(&ProfileUpdate { name, email }).await?;
                output::print(&updated)
            }
        }
    }
}

async fn load_image(path: &Path) -> Result<ImageUpload> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    Ok(ImageUpload { content_type: content_type_for(path).to_string(), filename, bytes })
}

fn content_type_for(path: &Path) -> &'static str {
    let extension =
        path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Commands,
    }

    fn parse(args: &[&str]) -> Commands {
        TestCli::try_parse_from(std::iter::once("recipebox").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(content_type_for(Path::new("cake.JPG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("soup.png")), "image/png");
        assert_eq!(content_type_for(Path::new("notes")), "application/octet-stream");
    }

    #[test]
    fn recipe_list_defaults_to_first_page() {
        match parse(&["recipes", "list", "--search", "bread"]) {
            Commands::Recipes { command: RecipeCommands::List { search, page } } => {
                assert_eq!(search.as_deref(), Some("bread"));
                assert_eq!(page, 1);
            }
            _ => panic!("expected recipes list"),
        }
    }

    #[test]
    fn recipe_add_requires_an_ingredient() {
        let result =
            TestCli::try_parse_from(["recipebox", "recipes", "add", "--name", "Soup"]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn draft_args_load_images() {
        let dir = tempfile::TempDir::new().unwrap();
        let image = dir.path().join("cake.png");
        std::fs::write(&image, [0x89, b'P', b'N', b'G']).unwrap();

        let image_arg = image.display().to_string();
        let Commands::Recipes { command: RecipeCommands::Add(args) } = parse(&[
            "recipes",
            "add",
            "--name",
            "Cake",
            "-i",
            "flour",
            "-i",
            "eggs",
            "--image",
            &image_arg,
        ]) else {
            panic!("expected recipes add");
        };

        let draft = args.into_draft().await.unwrap();
        assert_eq!(draft.ingredients, vec!["flour", "eggs"]);
        assert_eq!(draft.images.len(), 1);
        assert_eq!(draft.images[0].filename, "cake.png");
        assert_eq!(draft.images[0].content_type, "image/png");
        assert_eq!(draft.images[0].bytes.len(), 4);
    }

    #[test]
    fn login_reads_password_flag() {
        match parse(&["login", "--email", "a@example.com", "--password", "pw"]) {
            Commands::Login { email, password } => {
                assert_eq!(email, "a@example.com");
                assert_eq!(password, "pw");
            }
            _ => panic!("expected login"),
        }
    }
}
