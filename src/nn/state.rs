/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 参数的保存与加载（按参数名索引的状态字典）
 */

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::Module;
use crate::errors::EignError;

/// 参数名 → 参数值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateDict {
    params: BTreeMap<String, Array2<f32>>,
}

impl StateDict {
    pub fn from_module<M: Module>(module: &M) -> Self {
        let params = module
            .parameters()
            .into_iter()
            .map(|p| (p.name().to_string(), p.value().clone()))
            .collect();
        Self { params }
    }

    /// 把状态写回模块。模块中的每个参数都必须在字典里出现且形状一致；
    /// 先全部校验再写入，出错时模块保持原样
    pub fn load_into<M: Module>(&self, module: &mut M) -> Result<(), EignError> {
        for param in module.parameters() {
            let value = self.lookup(param.name())?;
            if value.shape() != param.value().shape() {
                return Err(EignError::ShapeMismatch {
                    context: format!("参数`{}`", param.name()),
                    expected: param.value().shape().to_vec(),
                    got: value.shape().to_vec(),
                });
            }
        }
        for param in module.parameters_mut() {
            let value = self.lookup(param.name())?;
            param.set_value(value)?;
        }
        Ok(())
    }

    fn lookup(&self, name: &str) -> Result<&Array2<f32>, EignError> {
        self.params
            .get(name)
            .ok_or_else(|| EignError::MissingParameter(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Array2<f32>> {
        self.params.get(name)
    }

    pub fn insert(&mut self, name: &str, value: Array2<f32>) {
        self.params.insert(name.to_string(), value);
    }

    /// 将状态字典写入本地文件
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), EignError> {
        let serialized_data = bincode::serialize(self)?;
        let mut file = File::create(path)?;
        file.write_all(&serialized_data)?;
        Ok(())
    }

    /// 从本地文件加载状态字典
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, EignError> {
        let mut serialized_data = Vec::new();
        File::open(path)?.read_to_end(&mut serialized_data)?;
        Ok(bincode::deserialize(&serialized_data)?)
    }
}
