//! Command-line surface: argument parsing and command execution.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::blog::BlogState;
use crate::post::PostBody;
use crate::store::{CancelToken, PostStore, StoreError};

#[derive(Debug, Parser)]
#[command(name = "blog-store", version, about = "Manage blog posts on a remote post service")]
pub struct Cli {
    /// Path to config file (default: ~/.config/blog-store/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the post service base URL
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all posts
    List,
    /// Create a post
    Create(PostArgs),
    /// Replace an existing post
    Update {
        /// Id of the post to replace
        id: String,
        #[command(flatten)]
        post: PostArgs,
    },
    /// Delete a post
    Delete {
        /// Id of the post to delete
        id: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct PostArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long, default_value = "")]
    pub featured_image: String,
    #[arg(long, default_value = "")]
    pub publish_date: String,
    #[arg(long)]
    pub published: bool,
}

impl From<PostArgs> for PostBody {
    fn from(args: PostArgs) -> Self {
        PostBody {
            title: args.title,
            description: args.description,
            featured_image: args.featured_image,
            publish_date: args.publish_date,
            published: args.published,
            ..PostBody::default()
        }
    }
}

/// Run `command` against `store` and return the final snapshot.
///
/// Mutating commands load the post list first so the snapshot shows the
/// collection the mutation was applied to.
pub async fn execute(
    store: &PostStore,
    command: Command,
    cancel: &CancelToken,
) -> Result<BlogState, StoreError> {
    store.get_post_list_with_cancel(cancel.clone()).wait().await?;

    match command {
        Command::List => {}
        Command::Create(post) => {
            store
                .add_post_with_cancel(post.into(), cancel.clone())
                .wait()
                .await?;
        }
        Command::Update { id, post } => {
            store.start_editing(id.as_str());
            let body = PostBody::from(post).with_id(id.as_str());
            store
                .update_post_with_cancel(id, body, cancel.clone())
                .wait()
                .await?;
        }
        Command::Delete { id } => {
            store
                .delete_post_with_cancel(id, cancel.clone())
                .wait()
                .await?;
        }
    }

    Ok(store.snapshot())
}
