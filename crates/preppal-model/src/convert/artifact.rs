use preppal_entity::artifact::Kind as ArtifactKindModel;
use preppal_entity::artifact::Model as ArtifactModel;

use crate::artifact::{Artifact, ArtifactKind};
use crate::convert::{FromDbModel, IntoDbModel};

impl FromDbModel<ArtifactKindModel> for ArtifactKind {
    fn from_db_model(model: ArtifactKindModel) -> Self {
        match model {
            ArtifactKindModel::Summary => ArtifactKind::Summary,
            ArtifactKindModel::Flashcards => ArtifactKind::Flashcards,
            ArtifactKindModel::Quiz => ArtifactKind::Quiz,
        }
    }
}

impl IntoDbModel<ArtifactKindModel> for ArtifactKind {
    fn into_db_model(self) -> ArtifactKindModel {
        match self {
            ArtifactKind::Summary => ArtifactKindModel::Summary,
            ArtifactKind::Flashcards => ArtifactKindModel::Flashcards,
            ArtifactKind::Quiz => ArtifactKindModel::Quiz,
        }
    }
}

impl FromDbModel<ArtifactModel> for Artifact {
    fn from_db_model(model: ArtifactModel) -> Self {
        Self {
            id: model.id,
            upload_id: model.upload_id,
            kind: ArtifactKind::from_db_model(model.kind),
            tokens_charged: model.tokens_charged,
            storage_key: model.storage_key,
            created_at: model.created_at,
        }
    }
}
