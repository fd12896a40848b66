use super::Planner;
use crate::models::interpreter::{Interpreter, InterpreterId};
use crate::models::position::PositionError;

impl Planner {
    /// Fresh id for a new directory entry.
    pub fn new_interpreter_id(&self) -> InterpreterId {
        InterpreterId::new(self.fresh_id("interpreter", |candidate| {
            self.interpreters
                .iter()
                .any(|interpreter| interpreter.id.as_str() == candidate)
        }))
    }

    /// Add an interpreter, or replace the one with the same id. An edit that
    /// leaves the position unset keeps the stored position. Returns true if
    /// the interpreter was new.
    pub fn upsert_interpreter(&mut self, mut interpreter: Interpreter) -> bool {
        let created = match self
            .interpreters
            .iter_mut()
            .find(|existing| existing.id == interpreter.id)
        {
            Some(existing) => {
                if interpreter.position.is_none() {
                    interpreter.position = existing.position.take();
                }
                *existing = interpreter.clone();
                false
            }
            None => {
                self.interpreters.push(interpreter.clone());
                true
            }
        };

        self.save_interpreters();
        let action = if created { "Add interpreter" } else { "Edit interpreter" };
        self.record(action, interpreter.name);
        created
    }

    /// Reorder the directory: move `id` before `before`, or to the end.
    pub fn move_interpreter(&mut self, id: &InterpreterId, before: Option<&InterpreterId>) -> bool {
        if before == Some(id) {
            return false;
        }
        let Some(from) = self.interpreters.iter().position(|i| &i.id == id) else {
            return false;
        };
        if let Some(target) = before {
            if !self.interpreters.iter().any(|i| &i.id == target) {
                return false;
            }
        }

        let interpreter = self.interpreters.remove(from);
        let to = before
            .and_then(|target| self.interpreters.iter().position(|i| &i.id == target))
            .unwrap_or(self.interpreters.len());
        self.interpreters.insert(to, interpreter);
        if to == from {
            return false;
        }

        self.save_interpreters();
        true
    }

    /// Remove an interpreter everywhere: the directory, every event, the open
    /// roster and the working-day overrides.
    pub fn delete_interpreter(&mut self, id: &InterpreterId) -> bool {
        let Some(index) = self.interpreters.iter().position(|i| &i.id == id) else {
            return false;
        };
        let interpreter = self.interpreters.remove(index);

        let mut events_changed = 0;
        for event in &mut self.events {
            if event.unassign(id) {
                events_changed += 1;
            }
        }
        let roster_changed = self.roster.remove(id);
        let overrides_changed = self.assignments.remove_interpreter(id);

        log::info!(
            "Deleted interpreter {} ({}), removed from {} events",
            interpreter.name,
            id,
            events_changed
        );
        self.save_interpreters();
        if events_changed > 0 {
            self.save_events();
        }
        if roster_changed {
            self.save_groups();
        }
        if overrides_changed {
            self.save_assignments();
        }
        self.record("Delete interpreter", interpreter.name);
        true
    }

    /// Set an interpreter's roster position. The position must be in the catalog.
    pub fn set_interpreter_position(
        &mut self,
        id: &InterpreterId,
        position: &str,
    ) -> Result<bool, PositionError> {
        if !self.positions.contains(position) {
            return Err(PositionError::Unknown(position.to_string()));
        }
        let Some(interpreter) = self.interpreters.iter_mut().find(|i| &i.id == id) else {
            return Ok(false);
        };
        interpreter.position = Some(position.to_string());

        self.roster.set_position(id, position);
        self.save_interpreters();
        Ok(true)
    }

    pub fn add_position(&mut self, name: &str) -> Result<(), PositionError> {
        self.positions.add(name)?;
        self.save_positions();
        self.record("Add position", name.trim().to_string());
        Ok(())
    }

    /// Remove a position. Interpreters holding it move to the first
    /// remaining position.
    pub fn remove_position(&mut self, name: &str) -> Result<(), PositionError> {
        self.positions.remove(name)?;
        let fallback = self.positions.first().to_string();

        let mut moved = 0;
        for interpreter in &mut self.interpreters {
            if interpreter.position.as_deref() == Some(name) {
                interpreter.position = Some(fallback.clone());
                moved += 1;
            }
        }
        let stale: Vec<InterpreterId> = self
            .roster
            .sequence()
            .iter()
            .filter(|entry| entry.position == name)
            .map(|entry| entry.interpreter_id.clone())
            .collect();
        for id in &stale {
            self.roster.set_position(id, &fallback);
        }

        self.save_positions();
        if moved > 0 {
            self.save_interpreters();
        }
        self.record("Remove position", name.to_string());
        Ok(())
    }
}
