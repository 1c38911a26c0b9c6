//! Recipe command handlers.

use anyhow::Result;
use ladle_types::{Difficulty, NewRecipe};

use crate::cli::App;

pub async fn list(app: &App) -> Result<()> {
    if !app.recipes.ensure_loaded().await {
        anyhow::bail!("Could not fetch recipes. Are you logged in? (try `ladle login`)");
    }

    let recipes = app.recipes.recipes();
    if recipes.is_empty() {
        println!("No recipes yet. Create one with `ladle recipes create`.");
        return Ok(());
    }

    for recipe in &recipes {
        println!("{}  [{}]  {}", recipe.id, recipe.difficulty, recipe.title);
    }

    Ok(())
}

pub async fn show(app: &App, id: &str) -> Result<()> {
    let Some(recipe) = app.recipes.get(id).await else {
        anyhow::bail!("Recipe {} not found", id);
    };

    println!("{}", recipe.title);
    println!("  Difficulty: {}", recipe.difficulty);
    println!("  Created: {}", recipe.created_at.format("%Y-%m-%d %H:%M"));
    if let Some(email) = &recipe.email {
        println!("  By: {}", email);
    }
    println!();
    println!("{}", recipe.description);

    Ok(())
}

pub async fn create(
    app: &App,
    title: String,
    description: String,
    difficulty: Difficulty,
) -> Result<()> {
    let fields = NewRecipe {
        title,
        description,
        difficulty,
    };

    let Some(recipe) = app.recipes.create(&fields).await else {
        anyhow::bail!("Create failed. Are you logged in? (try `ladle login`)");
    };

    println!("✓ Created recipe {} ({})", recipe.title, recipe.id);
    Ok(())
}

pub async fn update(
    app: &App,
    id: &str,
    title: Option<String>,
    description: Option<String>,
    difficulty: Option<Difficulty>,
) -> Result<()> {
    // PUT wants the full record: fetch, overlay the given fields, send back
    let Some(mut recipe) = app.recipes.get(id).await else {
        anyhow::bail!("Recipe {} not found", id);
    };

    if let Some(title) = title {
        recipe.title = title;
    }
    if let Some(description) = description {
        recipe.description = description;
    }
    if let Some(difficulty) = difficulty {
        recipe.difficulty = difficulty;
    }

    if !app.recipes.update(&recipe).await {
        anyhow::bail!("Update failed");
    }

    println!("✓ Updated recipe {}", id);
    Ok(())
}

pub async fn delete(app: &App, id: &str) -> Result<()> {
    if !app.recipes.delete(id).await {
        anyhow::bail!("Delete failed for recipe {}", id);
    }

    println!("✓ Deleted recipe {}", id);
    Ok(())
}
