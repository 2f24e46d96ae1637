// ABOUTME: The migration runner - clones both repositories and squashes one
// ABOUTME: Mercurial revision into a single commit on a Git branch

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use indicatif::ProgressBar;

use crate::config::MigrationConfig;
use crate::fsops;
use crate::paths::WorkingPaths;
use crate::prompt::{Prompter, TerminalPrompter};
use crate::utils;
use crate::vcs::{Git, GitOps, Hg, HgOps, ToolRun};

/// Prefix concatenated with the operator-supplied revision tag to form the
/// squashed commit's message.
const COMMIT_MESSAGE_PREFIX: &str = "Migration of revision ";

/// How a migration run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// All nine steps ran; the squashed commit exists in the destination clone.
    Completed,
    /// The operator declined a destructive deletion; nothing further happened.
    Aborted,
}

/// Executes the migration sequence to completion or aborts cleanly on the
/// first unauthorized destructive action.
///
/// Version-control invocations are fire-and-forget: their results are logged
/// but never stop the sequence. Filesystem failures stop the run immediately.
pub struct MigrationRunner<G, H, P> {
    git: G,
    hg: H,
    prompter: P,
    config: MigrationConfig,
    paths: WorkingPaths,
}

impl MigrationRunner<Git, Hg, TerminalPrompter> {
    /// Runner wired to the real `git`/`hg` binaries and the terminal.
    pub fn new(config: MigrationConfig, paths: WorkingPaths) -> Self {
        Self {
            git: Git,
            hg: Hg,
            prompter: TerminalPrompter,
            config,
            paths,
        }
    }
}

impl<G, H, P> MigrationRunner<G, H, P>
where
    G: GitOps,
    H: HgOps,
    P: Prompter,
{
    /// Runner with injected clients and prompter, for tests.
    pub fn with_clients(
        git: G,
        hg: H,
        prompter: P,
        config: MigrationConfig,
        paths: WorkingPaths,
    ) -> Self {
        Self {
            git,
            hg,
            prompter,
            config,
            paths,
        }
    }

    /// Run the full migration sequence.
    ///
    /// Returns [`MigrationOutcome::Aborted`] when the operator declines a
    /// deletion prompt; that is a normal exit, not an error.
    pub async fn run(&self) -> Result<MigrationOutcome> {
        utils::banner("Preparing destination checkout");
        if !self.ensure_absent(&self.paths.destination)? {
            utils::banner("Migration aborted by operator");
            return Ok(MigrationOutcome::Aborted);
        }

        utils::banner("Cloning destination repository");
        let spinner = clone_spinner(&self.config.destination_url);
        let cloned = self
            .git
            .clone_repo(&self.config.destination_url, &self.paths.destination)
            .await;
        spinner.finish_and_clear();
        self.observe("git clone", cloned);

        utils::banner("Selecting destination branch");
        let branch = self.prompter.ask("github branch")?.trim().to_string();
        if self.ask_yes("Is this a new branch? (y/n)")? {
            let base_tag = self.prompter.ask("base tag for new branch")?;
            let checked_out = self
                .git
                .checkout(&self.paths.destination, base_tag.trim())
                .await;
            self.observe("git checkout", checked_out);
            let created = self.git.create_branch(&self.paths.destination, &branch).await;
            self.observe("git checkout -b", created);
        } else {
            let checked_out = self.git.checkout(&self.paths.destination, &branch).await;
            self.observe("git checkout", checked_out);
        }

        utils::banner("Preparing staging checkout");
        if !self.ensure_absent(&self.paths.staging)? {
            utils::banner("Migration aborted by operator");
            return Ok(MigrationOutcome::Aborted);
        }

        utils::banner("Cloning source repository");
        let spinner = clone_spinner(&self.config.source_url);
        let cloned = self
            .hg
            .clone_repo(&self.config.source_url, &self.paths.staging)
            .await;
        spinner.finish_and_clear();
        self.observe("hg clone", cloned);

        utils::banner("Updating staging checkout to the requested revision");
        let revision = self
            .prompter
            .ask("mercurial revision tag")?
            .trim()
            .to_string();
        let updated = self.hg.update_clean(&self.paths.staging, &revision).await;
        self.observe("hg update", updated);
        let purged = self.hg.purge(&self.paths.staging).await;
        self.observe("hg purge", purged);
        fsops::remove_tree(&self.paths.hg_dir())
            .context("Failed to strip mercurial metadata from the staging checkout")?;

        utils::banner("Rebuilding destination working tree");
        self.merge_metadata_and_content()?;

        utils::banner("Committing migrated tree");
        let staged = self.git.stage_all(&self.paths.destination).await;
        self.observe("git add", staged);
        let message = format!("{}{}", COMMIT_MESSAGE_PREFIX, revision);
        let committed = self.git.commit(&self.paths.destination, &message).await;
        self.observe("git commit", committed);

        // Deliberately left disabled. Review the squashed commit first, then
        // push by hand with `git push origin <branch>`, or enable this line.
        // self.observe("git push", self.git.push(&self.paths.destination, &branch).await);

        utils::banner("Migration finished - review the commit before pushing");
        Ok(MigrationOutcome::Completed)
    }

    /// Make sure `path` does not exist, asking the operator before deleting.
    ///
    /// Returns `false` when the operator declines; the caller aborts the run.
    fn ensure_absent(&self, path: &Path) -> Result<bool> {
        if !path.exists() {
            return Ok(true);
        }

        if !self.config.assume_yes {
            let question = format!("{} already exists. Delete it? (y/n)", path.display());
            if self.prompter.ask(&question)?.trim() != "y" {
                return Ok(false);
            }
        }

        fsops::remove_tree(path)?;
        Ok(true)
    }

    fn ask_yes(&self, question: &str) -> Result<bool> {
        Ok(self.prompter.ask(question)?.trim() == "y")
    }

    /// Swap the destination's `.git` out through the holding path, rebuild the
    /// directory from it, then merge the staging working tree on top.
    fn merge_metadata_and_content(&self) -> Result<()> {
        let git_dir = self.paths.git_dir();
        let hold = &self.paths.metadata_hold;

        if hold.exists() {
            bail!(
                "Metadata holding path {} already exists, likely from an interrupted run.\n\
                 Remove it and run the migration again",
                hold.display()
            );
        }

        fsops::copy_tree(&git_dir, hold)?;
        fsops::remove_tree(&self.paths.destination)?;
        fs::create_dir_all(&self.paths.destination)
            .with_context(|| format!("Failed to create {}", self.paths.destination.display()))?;
        fsops::copy_tree(hold, &git_dir)?;
        fsops::remove_tree(hold)?;

        fsops::copy_tree(&self.paths.staging, &self.paths.destination)?;
        Ok(())
    }

    /// Report a tool invocation's outcome without letting it stop the run.
    ///
    /// A failed clone or checkout surfaces later as a filesystem error; the
    /// operator reads the warnings and judges the final tree.
    fn observe(&self, action: &str, outcome: Result<ToolRun>) {
        match outcome {
            Ok(run) if run.success => tracing::debug!("{} succeeded", action),
            Ok(run) => tracing::warn!("⚠ {} exited with failure: {}", action, run.stderr.trim()),
            Err(err) => tracing::warn!("⚠ {} could not be started: {:#}", action, err),
        }
    }
}

fn clone_spinner(url: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message(format!("Cloning {}", url));
    spinner
}

/// Entry point for the `migrate` subcommand.
///
/// Checks that both version control clients are installed, then drives the
/// interactive runner. An operator abort is a normal exit.
pub async fn migrate(config: MigrationConfig) -> Result<()> {
    utils::check_required_tools()?;

    tracing::info!("Source:      {}", config.source_url);
    tracing::info!("Destination: {}", config.destination_url);
    tracing::info!("Work dir:    {}", config.work_dir.display());

    let paths = WorkingPaths::under(&config.work_dir);
    let runner = MigrationRunner::new(config, paths);

    // An operator abort is a normal exit, so both outcomes map to success.
    runner.run().await?;
    Ok(())
}
