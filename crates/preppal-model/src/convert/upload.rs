use preppal_entity::upload::Kind as UploadKindModel;
use preppal_entity::upload::Model as UploadModel;

use crate::convert::FromDbModel;
use crate::upload::{Upload, UploadKind};

impl FromDbModel<UploadKindModel> for UploadKind {
    fn from_db_model(model: UploadKindModel) -> Self {
        match model {
            UploadKindModel::Pdf => UploadKind::Pdf,
            UploadKindModel::Youtube => UploadKind::Youtube,
        }
    }
}

impl FromDbModel<UploadModel> for Upload {
    fn from_db_model(model: UploadModel) -> Self {
        Self {
            id: model.id,
            kind: UploadKind::from_db_model(model.kind),
            source: model.source,
            uploaded_at: model.uploaded_at,
        }
    }
}
